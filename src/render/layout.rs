//! Canvas sizing policies and the pixel layout they produce.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StarQrError};
use crate::types::{Circle, Colour, Point};

/// Largest canvas side the rasterizer is asked to allocate, in pixels.
pub const MAX_CANVAS_PX: u32 = 16_384;

/// How the canvas is sized around the symbol.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SizingPolicy {
    /// Canvas is 1.5x the symbol, with a star-tessellated margin.
    #[default]
    Expanded,
    /// Canvas is exactly the bordered symbol.
    Tight,
}

impl SizingPolicy {
    /// Quiet-zone modules used when no border is configured.
    pub fn default_border(self) -> u32 {
        match self {
            SizingPolicy::Expanded => 0,
            SizingPolicy::Tight => 4,
        }
    }

    /// Divisor applied to the reference size to get the clip radius.
    pub fn default_clip_ratio(self) -> f64 {
        match self {
            SizingPolicy::Expanded => 1.4,
            SizingPolicy::Tight => 2.0,
        }
    }

    /// Whether the background tessellation is drawn by default.
    pub fn default_background(self) -> bool {
        matches!(self, SizingPolicy::Expanded)
    }
}

/// Immutable rendering parameters for one scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Pixel size of one module.
    pub module_size: u32,
    /// Border in modules; `None` uses the sizing policy's default.
    pub border: Option<u32>,
    /// Fill colour for stars and finder squares.
    pub colour: Colour,
    pub sizing: SizingPolicy,
    /// Clip the composition to a circle.
    pub clip: bool,
    /// Override for the clip radius divisor.
    pub clip_ratio: Option<f64>,
    /// Override for drawing the background tessellation.
    pub background: Option<bool>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            module_size: 10,
            border: None,
            colour: Colour::TEAL,
            sizing: SizingPolicy::Expanded,
            clip: true,
            clip_ratio: None,
            background: None,
        }
    }
}

impl RenderConfig {
    /// Default configuration for a sizing policy.
    pub fn with_sizing(sizing: SizingPolicy) -> Self {
        Self {
            sizing,
            ..Default::default()
        }
    }

    pub fn effective_border(&self) -> u32 {
        self.border.unwrap_or_else(|| self.sizing.default_border())
    }

    pub fn effective_clip_ratio(&self) -> f64 {
        self.clip_ratio
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or_else(|| self.sizing.default_clip_ratio())
    }

    pub fn draws_background(&self) -> bool {
        self.background
            .unwrap_or_else(|| self.sizing.default_background())
    }
}

/// Pixel geometry derived from a module count and a [`RenderConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub module_size: u32,
    pub border: u32,
    /// Side of the bordered symbol, in pixels.
    pub symbol_px: u32,
    /// Side of the square canvas, in pixels.
    pub canvas_px: u32,
    /// Distance from the canvas edge to the symbol, in pixels.
    pub offset: u32,
    pub clip: Option<Circle>,
}

impl Layout {
    /// Fails when the canvas would not fit in [`MAX_CANVAS_PX`].
    pub fn new(modules: usize, config: &RenderConfig) -> Result<Self> {
        let module_size = config.module_size.max(1);
        let border = config.effective_border();

        let symbol_px = u32::try_from(modules)
            .ok()
            .and_then(|m| border.checked_mul(2)?.checked_add(m))
            .and_then(|side| side.checked_mul(module_size))
            .ok_or_else(|| oversized(modules, config))?;

        let canvas_px = match config.sizing {
            SizingPolicy::Expanded => {
                expanded_extent(symbol_px).ok_or_else(|| oversized(modules, config))?
            }
            SizingPolicy::Tight => symbol_px,
        };
        if canvas_px > MAX_CANVAS_PX {
            return Err(oversized(modules, config));
        }
        let offset = (canvas_px - symbol_px) / 2;

        let clip = config.clip.then(|| {
            let reference = match config.sizing {
                SizingPolicy::Expanded => symbol_px,
                SizingPolicy::Tight => canvas_px,
            };
            let center = offset as f64 + symbol_px as f64 / 2.0;
            Circle {
                center: Point::new(center, center),
                radius: reference as f64 / config.effective_clip_ratio(),
            }
        });

        Ok(Self {
            module_size,
            border,
            symbol_px,
            canvas_px,
            offset,
            clip,
        })
    }
}

fn oversized(modules: usize, config: &RenderConfig) -> StarQrError {
    StarQrError::Config {
        message: format!(
            "Canvas for {} modules at module_size {} with border {} exceeds {}px",
            modules,
            config.module_size,
            config.effective_border(),
            MAX_CANVAS_PX
        ),
        help: Some("Lower render.module_size or render.border".to_string()),
    }
}

/// Side of the expanded canvas: 1.5x the symbol, truncated to whole pixels.
pub fn expanded_extent(symbol_px: u32) -> Option<u32> {
    symbol_px.checked_mul(3).map(|px| px / 2)
}
