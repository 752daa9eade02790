//! PNG output for composed scenes.
//!
//! Scenes are exported to SVG, rasterized with resvg and encoded with image.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use resvg::{tiny_skia, usvg};

use crate::error::{Result, StarQrError};

use super::svg::to_svg;
use super::Scene;

/// Rasterize a scene at one pixel per canvas unit.
pub fn rasterize(scene: &Scene) -> Result<RgbaImage> {
    let svg = to_svg(scene);

    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default()).map_err(|e| {
        StarQrError::Rasterization {
            message: format!("Invalid vector scene: {}", e),
        }
    })?;

    let size = scene.size();
    let mut pixmap =
        tiny_skia::Pixmap::new(size, size).ok_or_else(|| StarQrError::Rasterization {
            message: format!("Cannot allocate a {}x{} canvas", size, size),
        })?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let mut buffer = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        buffer.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    RgbaImage::from_raw(size, size, buffer).ok_or_else(|| StarQrError::Rasterization {
        message: "Pixel buffer does not match canvas size".to_string(),
    })
}

/// Encode an image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| StarQrError::Rasterization {
            message: format!("Failed to encode PNG: {}", e),
        })?;
    Ok(bytes)
}

/// Rasterize a scene straight to PNG bytes.
pub fn export_png(scene: &Scene) -> Result<Vec<u8>> {
    encode_png(&rasterize(scene)?)
}

/// Write a scene to a PNG file.
pub fn write_png(scene: &Scene, path: &Path) -> Result<()> {
    let image = rasterize(scene)?;

    image.save(path).map_err(|e| StarQrError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::compose;
    use crate::types::{Circle, Colour, Drawable, Point, Shape};
    use tempfile::tempdir;

    fn block_scene(clip: Option<Circle>) -> Scene {
        let block = Drawable::new(Shape::square(Point::new(0.0, 0.0), 20.0), Colour::TEAL);
        compose(Vec::new(), vec![block], 40, clip)
    }

    #[test]
    fn test_rasterize_fills_shapes_over_white() {
        let img = rasterize(&block_scene(None)).unwrap();

        assert_eq!(img.width(), 40);
        assert_eq!(img.height(), 40);
        assert_eq!(img.get_pixel(10, 10).0, [0x00, 0x7a, 0x78, 255]);
        assert_eq!(img.get_pixel(30, 30).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_rasterize_applies_clip() {
        let clip = Circle {
            center: Point::new(20.0, 20.0),
            radius: 10.0,
        };
        let img = rasterize(&block_scene(Some(clip))).unwrap();

        // inside the block but outside the circle
        assert_eq!(img.get_pixel(2, 2).0, [255, 255, 255, 255]);
        // inside both
        assert_eq!(img.get_pixel(15, 15).0, [0x00, 0x7a, 0x78, 255]);
    }

    #[test]
    fn test_export_png_bytes() {
        let bytes = export_png(&block_scene(None)).unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (40, 40));
    }

    #[test]
    fn test_empty_canvas_is_an_error() {
        let scene = compose(Vec::new(), Vec::new(), 0, None);
        assert!(matches!(
            rasterize(&scene),
            Err(StarQrError::Rasterization { .. })
        ));
    }

    #[test]
    fn test_write_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("block.png");

        write_png(&block_scene(None), &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 40);
    }
}
