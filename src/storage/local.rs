//! Local filesystem storage implementation.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── member-viewer.toml    # Viewer configuration
//! ├── Members.csv           # Member export (default source)
//! ├── template.html         # Optional page template
//! └── members.html          # Rendered page
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::PageStorage;

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a relative key. Absolute keys are kept as is.
    pub fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl PageStorage for LocalStorage {
    async fn write_page(&self, key: &str, html: &str) -> Result<()> {
        self.write_bytes(key, html.as_bytes()).await?;
        log::info!("Wrote {} bytes to {}", html.len(), self.path(key).display());
        Ok(())
    }

    async fn load_template(&self, key: &str) -> Result<Option<String>> {
        match self.read_bytes(key).await? {
            Some(bytes) => String::from_utf8(bytes).map(Some).map_err(|e| {
                AppError::config(format!("Template {key} is not valid UTF-8: {e}"))
            }),
            None => {
                log::warn!("No template found at {}", self.path(key).display());
                Ok(None)
            }
        }
    }
}
