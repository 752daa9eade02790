use miette::Diagnostic;
use thiserror::Error;

/// Main error type for starqr operations
#[derive(Error, Diagnostic, Debug)]
pub enum StarQrError {
    #[error("IO error: {0}")]
    #[diagnostic(code(starqr::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(starqr::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Unsupported QR style: {style}")]
    #[diagnostic(
        code(starqr::style),
        help("Only the 'star' style is supported")
    )]
    InvalidStyle { style: String },

    #[error("Encoding error: {message}")]
    #[diagnostic(code(starqr::encode))]
    Encoding {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Rasterization error: {message}")]
    #[diagnostic(code(starqr::raster))]
    Rasterization { message: String },

    #[error("Upload error: {message}")]
    #[diagnostic(code(starqr::upload))]
    Upload { message: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(starqr::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Bad request: {message}")]
    #[diagnostic(code(starqr::http))]
    Http { message: String },
}

impl StarQrError {
    /// Whether the failure was caused by the caller's input.
    ///
    /// Client errors map to HTTP 400, everything else to 500.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StarQrError::InvalidStyle { .. } | StarQrError::Encoding { .. } | StarQrError::Http { .. }
        )
    }

    /// The reason reported back to a caller.
    ///
    /// Server-side failures are summarised; their details (paths, upstream
    /// response bodies) stay in the server log.
    pub fn public_message(&self) -> String {
        match self {
            StarQrError::InvalidStyle { style } => {
                format!("Unsupported type '{}': only 'star' is supported.", style)
            }
            StarQrError::Encoding { message, .. } => {
                format!("Could not encode payload as a QR code: {}", message)
            }
            StarQrError::Http { message } => message.clone(),
            StarQrError::Rasterization { .. } => "Failed to render QR image.".to_string(),
            StarQrError::Upload { .. } => "Failed to upload QR image.".to_string(),
            StarQrError::Config { .. } => "Server is misconfigured.".to_string(),
            StarQrError::IoError(_) | StarQrError::Io { .. } => {
                "Internal I/O failure.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, StarQrError>;
