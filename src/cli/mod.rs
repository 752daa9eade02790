pub mod completions;
pub mod generate;
pub mod render;
pub mod serve;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{Config, RenderSettings};
use crate::encode::ErrorCorrection;
use crate::error::Result;
use crate::render::SizingPolicy;
use crate::types::Colour;

/// starqr - star-tessellated QR code renderer
#[derive(Parser, Debug)]
#[command(name = "starqr")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./starqr.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a QR code to a local PNG or SVG file
    Render(render::RenderArgs),

    /// Render, upload and print the retrieval URL as JSON
    Generate(generate::GenerateArgs),

    /// Serve the POST /generate endpoint
    Serve(serve::ServeArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Rendering overrides shared by every command that renders.
#[derive(Args, Debug, Default, Clone)]
pub struct RenderOverrides {
    /// Pixel size of one module
    #[arg(long)]
    pub module_size: Option<u32>,

    /// Fill colour (#RGB, #RRGGBB or #RRGGBBAA)
    #[arg(long)]
    pub colour: Option<Colour>,

    /// Canvas sizing policy
    #[arg(long, value_enum)]
    pub sizing: Option<SizingPolicy>,

    /// Border in modules
    #[arg(long)]
    pub border: Option<u32>,

    /// Disable the circular clip
    #[arg(long)]
    pub no_clip: bool,

    /// Error-correction level
    #[arg(long, value_enum)]
    pub ec_level: Option<ErrorCorrection>,
}

impl RenderOverrides {
    /// Apply flags on top of configured settings.
    pub fn apply(&self, settings: &mut RenderSettings) {
        if let Some(size) = self.module_size {
            settings.module_size = size;
        }
        if let Some(colour) = self.colour {
            settings.colour = colour;
        }
        if let Some(sizing) = self.sizing {
            settings.sizing = sizing;
        }
        if let Some(border) = self.border {
            settings.border = Some(border);
        }
        if self.no_clip {
            settings.clip = false;
        }
        if let Some(level) = self.ec_level {
            settings.ec_level = level;
        }
    }
}

/// Load configuration from `--config` or the working directory.
pub fn load_config(explicit: Option<&std::path::Path>) -> Result<Config> {
    let cwd = std::env::current_dir()?;
    Config::discover(explicit, &cwd)
}
