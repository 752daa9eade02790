//! Scene composition: canvas, background layer, symbol layer and clip.

use crate::error::Result;
use crate::types::{BitMatrix, Circle, Colour, Drawable};

use super::background::tessellate_background;
use super::layout::{Layout, RenderConfig};
use super::symbol::{render_symbol, ShapeStyle, SymbolPlacement};

/// A composed drawing, ready for export.
///
/// Shapes are painted in order. The clip is applied at export time; shapes
/// falling outside it stay in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    size: u32,
    background: Colour,
    clip: Option<Circle>,
    shapes: Vec<Drawable>,
    /// Index of the first symbol shape.
    symbol_start: usize,
}

impl Scene {
    /// Side of the square canvas in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Full-canvas fill painted beneath every shape.
    pub fn background(&self) -> Colour {
        self.background
    }

    pub fn clip(&self) -> Option<Circle> {
        self.clip
    }

    /// All shapes, background layer first.
    pub fn shapes(&self) -> &[Drawable] {
        &self.shapes
    }

    pub fn background_shapes(&self) -> &[Drawable] {
        &self.shapes[..self.symbol_start]
    }

    pub fn symbol_shapes(&self) -> &[Drawable] {
        &self.shapes[self.symbol_start..]
    }
}

/// Stack the background layer under the symbol layer on a white canvas.
pub fn compose(
    background: impl IntoIterator<Item = Drawable>,
    symbol: impl IntoIterator<Item = Drawable>,
    size: u32,
    clip: Option<Circle>,
) -> Scene {
    let mut shapes: Vec<Drawable> = background.into_iter().collect();
    let symbol_start = shapes.len();
    shapes.extend(symbol);

    Scene {
        size,
        background: Colour::WHITE,
        clip,
        shapes,
        symbol_start,
    }
}

/// Build the full scene for an encoded matrix.
pub fn render_scene(
    matrix: &BitMatrix,
    style: ShapeStyle,
    config: &RenderConfig,
) -> Result<Scene> {
    let layout = Layout::new(matrix.size(), config)?;

    let background = config.draws_background().then(|| {
        tessellate_background(layout.symbol_px, layout.offset, layout.module_size, config.colour)
            .within(layout.canvas_px)
    });

    let placement = SymbolPlacement {
        border: layout.border,
        module_size: layout.module_size,
        offset: layout.offset,
    };
    let symbol = render_symbol(matrix, style, placement, config.colour);

    Ok(compose(
        background.into_iter().flatten(),
        symbol,
        layout.canvas_px,
        layout.clip,
    ))
}
