//! Cloudinary upload API client.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::blocking::{multipart, Client};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use url::Url;

use crate::error::{Result, StarQrError};

use super::{StoredImage, UploadOptions, Uploader};

const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Account credentials, read once at start-up.
#[derive(Clone, PartialEq, Eq)]
pub struct CloudinaryCredentials {
    pub cloud_name: String,
    pub api_key: String,
    api_secret: String,
}

impl fmt::Debug for CloudinaryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryCredentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

impl CloudinaryCredentials {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Parse `cloudinary://<api_key>:<api_secret>@<cloud_name>`.
    pub fn from_url(s: &str) -> Result<Self> {
        let invalid = || StarQrError::Config {
            message: "CLOUDINARY_URL is malformed".to_string(),
            help: Some("Expected cloudinary://<api_key>:<api_secret>@<cloud_name>".to_string()),
        };

        let url = Url::parse(s).map_err(|_| invalid())?;
        if url.scheme() != "cloudinary" {
            return Err(invalid());
        }
        let cloud_name = url.host_str().filter(|h| !h.is_empty()).ok_or_else(invalid)?;
        let api_secret = url.password().filter(|p| !p.is_empty()).ok_or_else(invalid)?;
        if url.username().is_empty() {
            return Err(invalid());
        }

        Ok(Self::new(cloud_name, url.username(), api_secret))
    }

    /// Read credentials from the process environment.
    pub fn from_env(cloud_name: Option<&str>) -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cloud_name)
    }

    /// Resolve credentials from `CLOUDINARY_URL`, or the separate
    /// `CLOUDINARY_CLOUD_NAME` / `CLOUDINARY_API_KEY` / `CLOUDINARY_API_SECRET`
    /// variables. `cloud_name` fills in a missing cloud name.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        cloud_name: Option<&str>,
    ) -> Result<Self> {
        if let Some(url) = lookup("CLOUDINARY_URL") {
            return Self::from_url(&url);
        }

        let missing = |var: &str| StarQrError::Config {
            message: format!("{} is not set", var),
            help: Some("Set CLOUDINARY_URL or the CLOUDINARY_* variables".to_string()),
        };

        let cloud_name = lookup("CLOUDINARY_CLOUD_NAME")
            .or_else(|| cloud_name.map(str::to_string))
            .ok_or_else(|| missing("CLOUDINARY_CLOUD_NAME"))?;
        let api_key = lookup("CLOUDINARY_API_KEY").ok_or_else(|| missing("CLOUDINARY_API_KEY"))?;
        let api_secret =
            lookup("CLOUDINARY_API_SECRET").ok_or_else(|| missing("CLOUDINARY_API_SECRET"))?;

        Ok(Self::new(cloud_name, api_key, api_secret))
    }

    /// SHA-256 request signature over the sorted upload parameters.
    fn sign(&self, params: &BTreeMap<&str, String>) -> String {
        let joined = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(joined.as_bytes());
        hasher.update(self.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Signed uploads to a Cloudinary account.
pub struct CloudinaryStore {
    credentials: CloudinaryCredentials,
    api_base: String,
    client: Client,
}

impl CloudinaryStore {
    pub fn new(credentials: CloudinaryCredentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| StarQrError::Config {
                message: format!("Failed to create HTTP client: {}", e),
                help: None,
            })?;

        Ok(Self {
            credentials,
            api_base: DEFAULT_API_BASE.to_string(),
            client,
        })
    }

    /// Point the client at another API root (used against local mocks).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/{}/image/upload",
            self.api_base.trim_end_matches('/'),
            self.credentials.cloud_name
        )
    }
}

impl Uploader for CloudinaryStore {
    fn upload(&self, png: &[u8], options: &UploadOptions) -> Result<StoredImage> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        let mut params = BTreeMap::new();
        params.insert("folder", options.folder.clone());
        params.insert("overwrite", options.overwrite.to_string());
        params.insert("timestamp", timestamp.to_string());
        if let Some(id) = &options.public_id {
            params.insert("public_id", id.clone());
        }
        let signature = self.credentials.sign(&params);

        let file = multipart::Part::bytes(png.to_vec())
            .file_name("qr.png")
            .mime_str("image/png")
            .map_err(|e| StarQrError::Upload {
                message: format!("Failed to build upload form: {}", e),
            })?;

        let mut form = multipart::Form::new()
            .part("file", file)
            .text("api_key", self.credentials.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");
        for (key, value) in params {
            form = form.text(key, value);
        }

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .map_err(|e| StarQrError::Upload {
                message: format!("Failed to reach storage service: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let reason = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(StarQrError::Upload {
                message: format!("Storage service rejected upload ({}): {}", status, reason),
            });
        }

        let result: UploadResponse = response.json().map_err(|e| StarQrError::Upload {
            message: format!("Failed to parse upload response: {}", e),
        })?;

        Ok(StoredImage {
            secure_url: result.secure_url,
        })
    }
}
