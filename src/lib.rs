//! starqr - star-tessellated QR code renderer
//!
//! Encodes a payload as a QR matrix, draws every dark module as a
//! five-pointed star (finder patterns stay solid), surrounds the symbol with
//! a tessellated star margin, clips the composition to a circle and
//! publishes the rasterized PNG to blob storage.

pub mod cli;
pub mod config;
pub mod encode;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod server;
pub mod storage;
pub mod types;

pub use config::{Config, CONFIG_FILENAME};
pub use encode::{encode, ErrorCorrection};
pub use error::{Result, StarQrError};
pub use pipeline::{GenerateRequest, GenerateResponse, Generator};
pub use render::{
    compose, export_png, finder_zones, render_scene, render_symbol, star, tessellate_background,
    to_svg, RenderConfig, Scene, ShapeStyle, SizingPolicy,
};
pub use storage::{
    CloudinaryCredentials, CloudinaryStore, LocalStore, StoredImage, UploadOptions, Uploader,
};
pub use types::{BitMatrix, Circle, Colour, Drawable, Point, Polygon, Shape};
