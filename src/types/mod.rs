//! Core domain types for starqr.
//!
//! - `BitMatrix` - the encoded QR module grid
//! - `Point`, `Polygon`, `Shape`, `Drawable` - vector scene primitives
//! - `Colour` - RGBA fill colours

mod colour;
mod geometry;
mod matrix;

pub use colour::Colour;
pub use geometry::{Circle, Drawable, Point, Polygon, Shape};
pub use matrix::BitMatrix;
