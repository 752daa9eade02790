//! Serve command implementation.

use std::path::Path;

use clap::Args;

use crate::error::Result;
use crate::output::Printer;
use crate::server::serve;

use super::generate::build_generator;
use super::{load_config, RenderOverrides};

/// Serve the POST /generate endpoint
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind (default from config: 127.0.0.1:8000)
    #[arg(long)]
    pub bind: Option<String>,

    #[command(flatten)]
    pub overrides: RenderOverrides,
}

pub fn run(args: ServeArgs, config_path: Option<&Path>, printer: &Printer) -> Result<()> {
    let mut config = load_config(config_path)?;
    args.overrides.apply(&mut config.render);
    let bind = args.bind.unwrap_or_else(|| config.server.bind.clone());

    let generator = build_generator(&config)?;
    printer.info(
        "Storage",
        &format!("{:?} backend, folder '{}'", config.storage.backend, config.storage.folder),
    );

    serve(&bind, generator, config.server.max_body, *printer)
}
