//! Background tessellation of small stars around the symbol.

use crate::types::{Colour, Drawable, Point, Shape};

use super::layout::expanded_extent;
use super::star::{star, STAR_POINTS};

/// Grid step as a fraction of the module size.
const SPACING_RATIO: f64 = 0.9;
/// Outer radius as a fraction of the module size.
const OUTER_RATIO: f64 = 0.33;
/// Inner radius as a fraction of the outer radius.
const INNER_RATIO: f64 = 0.5;

/// Lazy row-major walk over the background grid.
///
/// Yields one star per grid point outside the symbol. The exclusion square
/// is shrunk by one grid step on its far edges, which leaves a seam of
/// background stars touching the symbol's right and bottom border.
#[derive(Debug, Clone)]
pub struct BackgroundStars {
    extent: u32,
    spacing: u32,
    skip_start: u32,
    skip_end: u32,
    module_size: f64,
    fill: Colour,
    gx: u32,
    gy: u32,
}

impl BackgroundStars {
    /// Limit the walk to a square canvas of `extent` pixels.
    pub fn within(mut self, extent: u32) -> Self {
        self.extent = extent;
        self
    }

    fn skipped(&self, gx: u32, gy: u32) -> bool {
        let inside = |g: u32| self.skip_start <= g && g < self.skip_end;
        inside(gx) && inside(gy)
    }
}

impl Iterator for BackgroundStars {
    type Item = Drawable;

    fn next(&mut self) -> Option<Drawable> {
        while self.gy < self.extent {
            let (gx, gy) = (self.gx, self.gy);

            self.gx = self.gx.saturating_add(self.spacing);
            if self.gx >= self.extent {
                self.gx = 0;
                self.gy = self.gy.saturating_add(self.spacing);
            }

            if self.skipped(gx, gy) {
                continue;
            }

            let half = self.module_size / 2.0;
            let center = Point::new(gx as f64 + half, gy as f64 + half);
            let outer = self.module_size * OUTER_RATIO;
            let polygon = star(center, outer, outer * INNER_RATIO, STAR_POINTS);
            return Some(Drawable::new(Shape::Polygon(polygon), self.fill));
        }
        None
    }
}

/// Tessellate the expanded canvas around a symbol of `symbol_px` pixels
/// placed at `offset`. Use [`BackgroundStars::within`] for any other canvas.
pub fn tessellate_background(
    symbol_px: u32,
    offset: u32,
    module_size: u32,
    fill: Colour,
) -> BackgroundStars {
    // Whole-pixel grid step; never zero so the walk always advances.
    let spacing = ((module_size as f64 * SPACING_RATIO) as u32).max(1);

    BackgroundStars {
        extent: expanded_extent(symbol_px).unwrap_or(u32::MAX),
        spacing,
        skip_start: offset,
        skip_end: offset.saturating_add(symbol_px).saturating_sub(spacing),
        module_size: module_size as f64,
        fill,
        gx: 0,
        gy: 0,
    }
}
