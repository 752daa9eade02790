//! Render command implementation.
//!
//! Encodes text and writes the styled QR code to a local PNG or SVG file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::encode::encode;
use crate::error::{Result, StarQrError};
use crate::output::{display_path, plural, Printer};
use crate::render::{render_scene, write_png, write_svg, ShapeStyle};

use super::{load_config, RenderOverrides};

/// Render a QR code to a local file
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Text to encode
    pub text: String,

    /// Output file; `.svg` writes vector output, anything else PNG
    #[arg(long, short, default_value = "qr.png")]
    pub output: PathBuf,

    /// Module shape style
    #[arg(long, value_enum, default_value_t = ShapeStyle::Star)]
    pub style: ShapeStyle,

    #[command(flatten)]
    pub overrides: RenderOverrides,
}

pub fn run(args: RenderArgs, config_path: Option<&Path>, printer: &Printer) -> Result<()> {
    let mut config = load_config(config_path)?;
    args.overrides.apply(&mut config.render);

    let matrix = encode(&args.text, config.render.ec_level)?;
    let scene = render_scene(&matrix, args.style, &config.render.to_render_config())?;

    printer.status(
        "Rendered",
        &format!(
            "{} QR ({}x{} modules, {})",
            args.style,
            matrix.size(),
            matrix.size(),
            plural(scene.shapes().len(), "shape", "shapes")
        ),
    );

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StarQrError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let is_svg = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        write_svg(&scene, &args.output)?;
    } else {
        write_png(&scene, &args.output)?;
    }

    printer.status(
        "Wrote",
        &format!("{} ({}x{})", display_path(&args.output), scene.size(), scene.size()),
    );
    Ok(())
}
