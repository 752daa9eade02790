//! Image storage backends.
//!
//! The pipeline only sees the [`Uploader`] trait; credentials live inside
//! the concrete backend, built once at start-up.

mod cloudinary;
mod local;

pub use cloudinary::{CloudinaryCredentials, CloudinaryStore};
pub use local::LocalStore;

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::error::Result;

/// Where and how an image is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    /// Destination folder inside the store.
    pub folder: String,
    /// Replace an existing image with the same id.
    pub overwrite: bool,
    /// Explicit image id; backends pick one when absent.
    pub public_id: Option<String>,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            folder: "qrcodes".to_string(),
            overwrite: true,
            public_id: None,
        }
    }
}

/// A stored image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Retrieval URL for the image.
    pub secure_url: String,
}

/// Upload capability handed to the request pipeline.
pub trait Uploader: Send + Sync {
    fn upload(&self, png: &[u8], options: &UploadOptions) -> Result<StoredImage>;
}

impl<U: Uploader + ?Sized> Uploader for Box<U> {
    fn upload(&self, png: &[u8], options: &UploadOptions) -> Result<StoredImage> {
        (**self).upload(png, options)
    }
}

impl<U: Uploader + ?Sized> Uploader for Arc<U> {
    fn upload(&self, png: &[u8], options: &UploadOptions) -> Result<StoredImage> {
        (**self).upload(png, options)
    }
}

/// Short content hash used to name images without an explicit id.
pub fn content_id(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode(&digest[..8])
}
