//! Rendering module for starqr.
//!
//! Turns an encoded module matrix into a vector scene (background stars,
//! symbol shapes, circular clip) and exports it as SVG or PNG.

mod background;
mod finder;
mod layout;
mod png;
mod scene;
mod star;
mod svg;
mod symbol;

pub use background::{tessellate_background, BackgroundStars};
pub use finder::{finder_zones, FinderZones, FINDER_SIZE};
pub use layout::{Layout, RenderConfig, SizingPolicy};
pub use png::{encode_png, export_png, rasterize, write_png};
pub use scene::{compose, render_scene, Scene};
pub use star::{star, STAR_POINTS};
pub use svg::{to_svg, write_svg, CLIP_ID};
pub use symbol::{render_symbol, ShapeStyle, SymbolPlacement};
