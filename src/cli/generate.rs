//! Generate command implementation.
//!
//! Runs the full request pipeline once and prints the JSON response.

use std::path::Path;

use clap::Args;

use crate::config::Config;
use crate::error::{Result, StarQrError};
use crate::output::Printer;
use crate::pipeline::{GenerateRequest, Generator};

use super::{load_config, RenderOverrides};

/// Render a QR code, upload it and print `{"url": ...}`
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Text or URL to encode
    pub url: String,

    /// Shape style tag
    #[arg(long = "type", default_value = "star")]
    pub kind: String,

    /// Destination folder in the store
    #[arg(long)]
    pub folder: Option<String>,

    #[command(flatten)]
    pub overrides: RenderOverrides,
}

/// Build a generator from configuration; this is where storage
/// credentials are resolved.
pub fn build_generator(config: &Config) -> Result<Generator> {
    let uploader = config.storage.build_uploader()?;
    Ok(Generator::new(uploader)
        .with_render_config(config.render.to_render_config())
        .with_ec_level(config.render.ec_level)
        .with_upload_options(config.storage.upload_options()))
}

pub fn run(args: GenerateArgs, config_path: Option<&Path>, printer: &Printer) -> Result<()> {
    let mut config = load_config(config_path)?;
    args.overrides.apply(&mut config.render);
    if let Some(folder) = args.folder {
        config.storage.folder = folder;
    }

    let generator = build_generator(&config)?;
    let request = GenerateRequest::new(args.kind, args.url);
    let response = generator.generate(&request)?;

    printer.status("Uploaded", &response.url);

    let json = serde_json::to_string_pretty(&response).map_err(|e| StarQrError::Http {
        message: format!("Failed to serialize response: {}", e),
    })?;
    println!("{}", json);

    Ok(())
}
