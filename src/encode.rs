//! QR encoding via the `qrcode` crate.

use qrcode::{Color, EcLevel, QrCode};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StarQrError};
use crate::types::BitMatrix;

/// QR error-correction level.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
    Low,
    Medium,
    Quartile,
    #[default]
    High,
}

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => EcLevel::L,
            ErrorCorrection::Medium => EcLevel::M,
            ErrorCorrection::Quartile => EcLevel::Q,
            ErrorCorrection::High => EcLevel::H,
        }
    }
}

/// Encode `text` in the smallest symbol version that fits at `level`.
pub fn encode(text: &str, level: ErrorCorrection) -> Result<BitMatrix> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), level.into()).map_err(|e| {
        StarQrError::Encoding {
            message: e.to_string(),
            help: Some("Shorten the payload or lower the error-correction level".to_string()),
        }
    })?;

    let size = code.width();
    let modules = code
        .to_colors()
        .into_iter()
        .map(|c| c == Color::Dark)
        .collect();

    BitMatrix::new(size, modules).ok_or_else(|| StarQrError::Encoding {
        message: format!("Encoder produced a non-square {}-module symbol", size),
        help: None,
    })
}
