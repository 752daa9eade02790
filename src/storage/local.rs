//! Filesystem-backed store.

use std::fs;
use std::path::{Component, Path, PathBuf};

use url::Url;

use crate::error::{Result, StarQrError};

use super::{content_id, StoredImage, UploadOptions, Uploader};

/// Writes images under a local directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
    base_url: Option<Url>,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            base_url: None,
        }
    }

    /// Serve URLs under `base_url` instead of `file://` paths.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url).map_err(|e| StarQrError::Config {
            message: format!("Invalid base URL '{}': {}", base_url, e),
            help: Some("Use an absolute URL such as https://cdn.example.com/".to_string()),
        })?;
        self.base_url = Some(url);
        Ok(self)
    }

    fn public_url(&self, folder: &str, file_name: &str, path: &Path) -> Result<String> {
        if let Some(base) = &self.base_url {
            let base = base.as_str().trim_end_matches('/');
            return Ok(format!("{}/{}/{}", base, folder, file_name));
        }

        let absolute = path.canonicalize().map_err(|e| StarQrError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to resolve stored image: {}", e),
        })?;
        Url::from_file_path(&absolute)
            .map(String::from)
            .map_err(|_| StarQrError::Upload {
                message: format!("Cannot build a URL for {}", absolute.display()),
            })
    }
}

impl Uploader for LocalStore {
    fn upload(&self, png: &[u8], options: &UploadOptions) -> Result<StoredImage> {
        let name = options
            .public_id
            .clone()
            .unwrap_or_else(|| content_id(png));
        check_relative(&options.folder)?;
        check_relative(&name)?;

        let folder_dir = self.dir.join(&options.folder);
        fs::create_dir_all(&folder_dir).map_err(|e| StarQrError::Io {
            path: folder_dir.clone(),
            message: format!("Failed to create folder: {}", e),
        })?;

        let file_name = format!("{}.png", name);
        let path = folder_dir.join(&file_name);
        if path.exists() && !options.overwrite {
            return Err(StarQrError::Upload {
                message: format!("{} already exists", path.display()),
            });
        }

        fs::write(&path, png).map_err(|e| StarQrError::Io {
            path: path.clone(),
            message: format!("Failed to write image: {}", e),
        })?;

        let secure_url = self.public_url(&options.folder, &file_name, &path)?;
        Ok(StoredImage { secure_url })
    }
}

/// Reject absolute paths and parent references in folder and id names.
fn check_relative(part: &str) -> Result<()> {
    let safe = !part.is_empty()
        && Path::new(part)
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
    if safe {
        Ok(())
    } else {
        Err(StarQrError::Upload {
            message: format!("Refusing to store under '{}'", part),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_upload_with_base_url() {
        let dir = tempdir().unwrap();
        let store = LocalStore::new(dir.path())
            .with_base_url("https://cdn.example.com/images/")
            .unwrap();

        let stored = store.upload(b"png-bytes", &UploadOptions::default()).unwrap();

        assert_eq!(
            stored.secure_url,
            "https://cdn.example.com/images/qrcodes/ea80334363eed145.png"
        );
        let written = fs::read(dir.path().join("qrcodes/ea80334363eed145.png")).unwrap();
        assert_eq!(written, b"png-bytes");
    }

    #[test]
    fn test_upload_file_url() {
        let dir = tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let options = UploadOptions {
            public_id: Some("hello".to_string()),
            ..Default::default()
        };

        let stored = store.upload(b"data", &options).unwrap();

        assert!(stored.secure_url.starts_with("file://"));
        assert!(stored.secure_url.ends_with("/qrcodes/hello.png"));
    }

    #[test]
    fn test_overwrite_flag() {
        let dir = tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let options = UploadOptions {
            public_id: Some("same".to_string()),
            overwrite: false,
            ..Default::default()
        };

        store.upload(b"first", &options).unwrap();
        let err = store.upload(b"second", &options).unwrap_err();
        assert!(matches!(err, StarQrError::Upload { .. }));

        let options = UploadOptions {
            overwrite: true,
            ..options
        };
        store.upload(b"second", &options).unwrap();
        let written = fs::read(dir.path().join("qrcodes/same.png")).unwrap();
        assert_eq!(written, b"second");
    }

    #[test]
    fn test_rejects_escaping_names() {
        let dir = tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let options = UploadOptions {
            folder: "../outside".to_string(),
            ..Default::default()
        };
        assert!(store.upload(b"x", &options).is_err());
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(LocalStore::new("dist").with_base_url("not a url").is_err());
    }
}
