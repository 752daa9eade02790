//! Project configuration (starqr.yaml).
//!
//! Every section has defaults, so an empty or missing file is valid.
//! Storage credentials never live here; they come from the environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::encode::ErrorCorrection;
use crate::error::{Result, StarQrError};
use crate::render::{RenderConfig, SizingPolicy};
use crate::storage::{CloudinaryCredentials, CloudinaryStore, LocalStore, UploadOptions, Uploader};
use crate::types::Colour;

/// Configuration file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "starqr.yaml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderSettings,
    pub storage: StorageSettings,
    pub server: ServerSettings,
}

/// Rendering defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Pixel size of one module.
    pub module_size: u32,
    pub colour: Colour,
    pub sizing: SizingPolicy,
    /// Border in modules; defaults per sizing policy.
    pub border: Option<u32>,
    pub clip: bool,
    /// Clip radius divisor; defaults per sizing policy.
    pub clip_ratio: Option<f64>,
    /// Draw the background tessellation; defaults per sizing policy.
    pub background: Option<bool>,
    pub ec_level: ErrorCorrection,
}

impl Default for RenderSettings {
    fn default() -> Self {
        let render = RenderConfig::default();
        Self {
            module_size: render.module_size,
            colour: render.colour,
            sizing: render.sizing,
            border: render.border,
            clip: render.clip,
            clip_ratio: render.clip_ratio,
            background: render.background,
            ec_level: ErrorCorrection::High,
        }
    }
}

impl RenderSettings {
    pub fn to_render_config(&self) -> RenderConfig {
        RenderConfig {
            module_size: self.module_size,
            border: self.border,
            colour: self.colour,
            sizing: self.sizing,
            clip: self.clip,
            clip_ratio: self.clip_ratio,
            background: self.background,
        }
    }
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Local,
    Cloudinary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Destination folder for uploaded images.
    pub folder: String,
    pub overwrite: bool,
    pub local: LocalSettings,
    pub cloudinary: CloudinarySettings,
}

impl Default for StorageSettings {
    fn default() -> Self {
        let options = UploadOptions::default();
        Self {
            backend: StorageBackend::Local,
            folder: options.folder,
            overwrite: options.overwrite,
            local: LocalSettings::default(),
            cloudinary: CloudinarySettings::default(),
        }
    }
}

impl StorageSettings {
    pub fn upload_options(&self) -> UploadOptions {
        UploadOptions {
            folder: self.folder.clone(),
            overwrite: self.overwrite,
            public_id: None,
        }
    }

    /// Build the configured backend. Cloudinary credentials are read from
    /// the environment here and nowhere else.
    pub fn build_uploader(&self) -> Result<Box<dyn Uploader>> {
        match self.backend {
            StorageBackend::Local => {
                let store = LocalStore::new(&self.local.dir);
                let store = match &self.local.base_url {
                    Some(base) => store.with_base_url(base)?,
                    None => store,
                };
                Ok(Box::new(store))
            }
            StorageBackend::Cloudinary => {
                let credentials =
                    CloudinaryCredentials::from_env(self.cloudinary.cloud_name.as_deref())?;
                Ok(Box::new(CloudinaryStore::new(credentials)?))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalSettings {
    /// Root directory for stored images.
    pub dir: PathBuf,
    /// Public URL the directory is served under.
    pub base_url: Option<String>,
}

impl Default for LocalSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("dist"),
            base_url: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudinarySettings {
    pub cloud_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address the HTTP endpoint binds to.
    pub bind: String,
    /// Largest accepted request body, in bytes.
    pub max_body: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
            max_body: 64 * 1024,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| StarQrError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| StarQrError::Config {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Load `explicit` if given, else `starqr.yaml` in `dir` when present,
    /// else defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.render.module_size, 10);
        assert_eq!(config.render.colour, Colour::TEAL);
        assert_eq!(config.storage.folder, "qrcodes");
        assert_eq!(config.server.bind, "127.0.0.1:8000");
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r##"
render:
  module_size: 8
  colour: "#112233"
  sizing: tight
  border: 2
  clip: false
  clip_ratio: 2.5
  background: true
  ec_level: quartile
storage:
  backend: cloudinary
  folder: codes
  overwrite: false
  local:
    dir: out
    base_url: https://cdn.example.com
  cloudinary:
    cloud_name: demo
server:
  bind: 0.0.0.0:9000
  max_body: 1024
"##;
        let config = Config::parse(yaml).unwrap();

        let render = config.render.to_render_config();
        assert_eq!(render.module_size, 8);
        assert_eq!(render.colour, Colour::rgb(0x11, 0x22, 0x33));
        assert_eq!(render.sizing, SizingPolicy::Tight);
        assert_eq!(render.effective_border(), 2);
        assert!(!render.clip);
        assert_eq!(render.effective_clip_ratio(), 2.5);
        assert!(render.draws_background());
        assert_eq!(config.render.ec_level, ErrorCorrection::Quartile);

        assert_eq!(config.storage.backend, StorageBackend::Cloudinary);
        assert_eq!(
            config.storage.upload_options(),
            UploadOptions {
                folder: "codes".to_string(),
                overwrite: false,
                public_id: None,
            }
        );
        assert_eq!(config.storage.local.dir, PathBuf::from("out"));
        assert_eq!(config.storage.cloudinary.cloud_name.as_deref(), Some("demo"));
        assert_eq!(config.server.max_body, 1024);
    }

    #[test]
    fn test_parse_invalid_config() {
        let err = Config::parse("render:\n  colour: \"#zz\"\n").unwrap_err();
        assert!(matches!(err, StarQrError::Config { .. }));

        assert!(Config::parse("render:\n  sizing: huge\n").is_err());
    }

    #[test]
    fn test_discover() {
        let dir = tempdir().unwrap();
        assert_eq!(Config::discover(None, dir.path()).unwrap(), Config::default());

        std::fs::write(dir.path().join(CONFIG_FILENAME), "render:\n  module_size: 4\n").unwrap();
        let config = Config::discover(None, dir.path()).unwrap();
        assert_eq!(config.render.module_size, 4);

        let missing = dir.path().join("nope.yaml");
        assert!(Config::discover(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn test_local_uploader() {
        let dir = tempdir().unwrap();
        let settings = StorageSettings {
            local: LocalSettings {
                dir: dir.path().to_path_buf(),
                base_url: Some("https://cdn.example.com".to_string()),
            },
            ..Default::default()
        };

        let uploader = settings.build_uploader().unwrap();
        let stored = uploader
            .upload(b"png-bytes", &settings.upload_options())
            .unwrap();
        assert_eq!(
            stored.secure_url,
            "https://cdn.example.com/qrcodes/ea80334363eed145.png"
        );
    }
}
