//! Request pipeline: style check, encode, render, rasterize, upload.

use serde::{Deserialize, Serialize};

use crate::encode::{encode, ErrorCorrection};
use crate::error::Result;
use crate::render::{export_png, render_scene, RenderConfig, Scene, ShapeStyle};
use crate::storage::{UploadOptions, Uploader};

/// Inbound request: a style tag and the text to encode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

impl GenerateRequest {
    pub fn new(kind: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            url: url.into(),
        }
    }
}

/// Result of a successful request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Retrieval URL of the stored image.
    pub url: String,
}

/// Renders and publishes star QR codes.
///
/// Holds only immutable configuration and the upload capability, so one
/// instance serves concurrent requests.
pub struct Generator {
    render: RenderConfig,
    ec_level: ErrorCorrection,
    upload: UploadOptions,
    uploader: Box<dyn Uploader>,
}

impl Generator {
    pub fn new(uploader: Box<dyn Uploader>) -> Self {
        Self {
            render: RenderConfig::default(),
            ec_level: ErrorCorrection::High,
            upload: UploadOptions::default(),
            uploader,
        }
    }

    pub fn with_render_config(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    pub fn with_ec_level(mut self, ec_level: ErrorCorrection) -> Self {
        self.ec_level = ec_level;
        self
    }

    pub fn with_upload_options(mut self, upload: UploadOptions) -> Self {
        self.upload = upload;
        self
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    /// Encode `text` and build its scene.
    pub fn render(&self, text: &str, style: ShapeStyle) -> Result<Scene> {
        let matrix = encode(text, self.ec_level)?;
        render_scene(&matrix, style, &self.render)
    }

    /// Run the whole pipeline for one request.
    ///
    /// The style is checked before any work; the first failure ends the
    /// request and nothing is uploaded unless the PNG was produced.
    pub fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let style: ShapeStyle = request.kind.parse()?;
        let scene = self.render(&request.url, style)?;
        let png = export_png(&scene)?;
        let stored = self.uploader.upload(&png, &self.upload)?;

        Ok(GenerateResponse {
            url: stored.secure_url,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingStore;
    use super::*;
    use crate::error::StarQrError;
    use std::sync::Arc;

    fn generator(store: &Arc<RecordingStore>) -> Generator {
        Generator::new(Box::new(Arc::clone(store)))
    }

    #[test]
    fn test_generate_uploads_png() {
        let store = Arc::new(RecordingStore::default());
        let response = generator(&store)
            .generate(&GenerateRequest::new("star", "https://example.com"))
            .unwrap();

        assert_eq!(response.url, "https://cdn.example.test/qrcodes/1.png");
        let uploads = store.uploads.lock().unwrap();
        assert_eq!(uploads.len(), 1);
        assert!(uploads[0].0.starts_with(&[0x89, b'P', b'N', b'G']));
        assert_eq!(uploads[0].1, UploadOptions::default());
    }

    #[test]
    fn test_invalid_style_does_no_work() {
        let store = Arc::new(RecordingStore::default());
        let err = generator(&store)
            .generate(&GenerateRequest::new("circle", "https://example.com"))
            .unwrap_err();

        assert!(matches!(err, StarQrError::InvalidStyle { .. }));
        assert!(err.public_message().contains("circle"));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_encoding_failure_skips_upload() {
        let store = Arc::new(RecordingStore::default());
        let err = generator(&store)
            .generate(&GenerateRequest::new("star", "x".repeat(5000)))
            .unwrap_err();

        assert!(matches!(err, StarQrError::Encoding { .. }));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_oversized_canvas_skips_upload() {
        let store = Arc::new(RecordingStore::default());
        let render = RenderConfig {
            module_size: 60_000_000,
            ..Default::default()
        };
        let err = generator(&store)
            .with_render_config(render)
            .generate(&GenerateRequest::new("star", "https://example.com"))
            .unwrap_err();

        assert!(matches!(err, StarQrError::Config { .. }));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_upload_failure_propagates() {
        let generator = Generator::new(Box::new(RecordingStore::failing()));
        let err = generator
            .generate(&GenerateRequest::new("star", "hello"))
            .unwrap_err();

        assert!(matches!(err, StarQrError::Upload { .. }));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_render_symbol_matches_dark_modules() {
        let store = Arc::new(RecordingStore::default());
        let generator = generator(&store);
        let scene = generator.render("https://example.com", ShapeStyle::Star).unwrap();
        let matrix = encode("https://example.com", ErrorCorrection::High).unwrap();

        assert_eq!(scene.symbol_shapes().len(), matrix.dark_count());
    }

    #[test]
    fn test_request_json_uses_type_key() {
        let request: GenerateRequest =
            serde_json::from_str(r#"{"type":"star","url":"https://example.com"}"#).unwrap();
        assert_eq!(request, GenerateRequest::new("star", "https://example.com"));
    }
}
