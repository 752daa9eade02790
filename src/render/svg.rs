//! SVG serialization of a composed scene.

use std::fmt::Write;
use std::fs;
use std::path::Path;

use crate::error::{Result, StarQrError};
use crate::types::{Drawable, Shape};

use super::Scene;

/// Id of the circular clip path.
pub const CLIP_ID: &str = "circle-clip";

/// Serialize a scene as a standalone SVG document.
pub fn to_svg(scene: &Scene) -> String {
    let size = scene.size();
    let mut svg = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
    );

    if let Some(clip) = scene.clip() {
        let _ = writeln!(
            svg,
            r#"<defs><clipPath id="{CLIP_ID}"><circle cx="{}" cy="{}" r="{}"/></clipPath></defs>"#,
            num(clip.center.x),
            num(clip.center.y),
            num(clip.radius)
        );
    }

    let _ = writeln!(
        svg,
        r#"<rect x="0" y="0" width="{size}" height="{size}" fill="{}"/>"#,
        scene.background()
    );

    if scene.clip().is_some() {
        let _ = writeln!(svg, r#"<g clip-path="url(#{CLIP_ID})">"#);
    } else {
        svg.push_str("<g>\n");
    }
    for drawable in scene.shapes() {
        write_drawable(&mut svg, drawable);
    }
    svg.push_str("</g>\n</svg>\n");

    svg
}

/// Write a scene to an SVG file.
pub fn write_svg(scene: &Scene, path: &Path) -> Result<()> {
    fs::write(path, to_svg(scene)).map_err(|e| StarQrError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write SVG: {}", e),
    })
}

fn write_drawable(svg: &mut String, drawable: &Drawable) {
    match &drawable.shape {
        Shape::Polygon(polygon) => {
            let points: Vec<String> = polygon
                .vertices()
                .iter()
                .map(|p| format!("{},{}", num(p.x), num(p.y)))
                .collect();
            let _ = writeln!(
                svg,
                r#"<polygon points="{}" fill="{}"/>"#,
                points.join(" "),
                drawable.fill
            );
        }
        Shape::Rect {
            origin,
            width,
            height,
        } => {
            let _ = writeln!(
                svg,
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
                num(origin.x),
                num(origin.y),
                num(*width),
                num(*height),
                drawable.fill
            );
        }
    }
}

/// Format a coordinate with at most three decimals and no trailing zeros.
fn num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
