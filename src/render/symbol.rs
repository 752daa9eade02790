//! Symbol renderer: one shape per dark module.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StarQrError};
use crate::types::{BitMatrix, Colour, Drawable, Point, Shape};

use super::finder::FinderZones;
use super::star::{star, STAR_POINTS};

/// Per-module shape style, selected by the request's `type` tag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ShapeStyle {
    /// Five-pointed stars slightly larger than the module.
    #[default]
    Star,
}

impl ShapeStyle {
    pub fn name(self) -> &'static str {
        match self {
            ShapeStyle::Star => "star",
        }
    }

    /// Shape for a dark module outside the finder patterns.
    fn module_shape(self, center: Point, module_size: f64) -> Shape {
        match self {
            ShapeStyle::Star => {
                let outer = module_size * 0.65;
                Shape::Polygon(star(center, outer, outer * 0.55, STAR_POINTS))
            }
        }
    }
}

impl FromStr for ShapeStyle {
    type Err = StarQrError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "star" => Ok(ShapeStyle::Star),
            other => Err(StarQrError::InvalidStyle {
                style: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ShapeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Placement of the symbol on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolPlacement {
    /// Border in modules.
    pub border: u32,
    pub module_size: u32,
    /// Pixel offset of the bordered symbol from the canvas origin.
    pub offset: u32,
}

/// Emit the symbol layer in row-major order.
///
/// Finder modules become solid squares filling their cell; every other dark
/// module takes the style's shape centred in its cell. Light modules emit
/// nothing.
pub fn render_symbol(
    matrix: &BitMatrix,
    style: ShapeStyle,
    placement: SymbolPlacement,
    fill: Colour,
) -> impl Iterator<Item = Drawable> + '_ {
    let zones = FinderZones::new(matrix.size());
    let side = placement.module_size as f64;
    let shift = move |m: usize| {
        ((m as u32 + placement.border) * placement.module_size + placement.offset) as f64
    };

    matrix.dark_modules().map(move |(x, y)| {
        let origin = Point::new(shift(x), shift(y));
        let shape = if zones.contains(x, y) {
            Shape::square(origin, side)
        } else {
            let center = Point::new(origin.x + side / 2.0, origin.y + side / 2.0);
            style.module_shape(center, side)
        };
        Drawable::new(shape, fill)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn checker(size: usize) -> BitMatrix {
        let modules = (0..size * size).map(|i| (i % size + i / size) % 2 == 0).collect();
        BitMatrix::new(size, modules).unwrap()
    }

    #[test]
    fn test_parse_style() {
        assert_eq!("star".parse::<ShapeStyle>().unwrap(), ShapeStyle::Star);
        let err = "circle".parse::<ShapeStyle>().unwrap_err();
        assert!(matches!(err, StarQrError::InvalidStyle { ref style } if style == "circle"));
        assert!("Star".parse::<ShapeStyle>().is_err());
    }

    #[test]
    fn test_one_shape_per_dark_module() {
        let matrix = checker(21);
        let placement = SymbolPlacement {
            border: 0,
            module_size: 10,
            offset: 0,
        };
        let shapes: Vec<_> = render_symbol(&matrix, ShapeStyle::Star, placement, Colour::TEAL).collect();
        assert_eq!(shapes.len(), matrix.dark_count());
    }

    #[test]
    fn test_finder_module_is_square() {
        let matrix = BitMatrix::new(21, vec![true; 21 * 21]).unwrap();
        let placement = SymbolPlacement {
            border: 1,
            module_size: 10,
            offset: 5,
        };
        let first = render_symbol(&matrix, ShapeStyle::Star, placement, Colour::TEAL)
            .next()
            .unwrap();

        assert_eq!(
            first.shape,
            Shape::Rect {
                origin: Point::new(15.0, 15.0),
                width: 10.0,
                height: 10.0,
            }
        );
    }

    #[test]
    fn test_data_module_is_star() {
        let mut rows = vec![vec![false; 21]; 21];
        rows[10][10] = true;
        let matrix = BitMatrix::from_rows(&rows).unwrap();
        let placement = SymbolPlacement {
            border: 0,
            module_size: 10,
            offset: 62,
        };
        let shapes: Vec<_> = render_symbol(&matrix, ShapeStyle::Star, placement, Colour::TEAL).collect();
        assert_eq!(shapes.len(), 1);

        let Shape::Polygon(p) = &shapes[0].shape else {
            panic!("expected star");
        };
        assert_eq!(p.len(), 10);
        let center = Point::new(167.0, 167.0);
        assert!((center.distance(p.vertices()[0]) - 6.5).abs() < 1e-9);
        assert!((center.distance(p.vertices()[1]) - 3.575).abs() < 1e-9);
    }
}
