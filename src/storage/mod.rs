//! Storage abstractions for rendered pages.
//!
//! A page template is read once per run and the rendered page is written
//! back in a single atomic replace, so a reader never sees a half-written
//! directory page.

pub mod local;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for page storage backends.
#[async_trait]
pub trait PageStorage: Send + Sync {
    /// Write a rendered page under `key`, replacing any previous version.
    async fn write_page(&self, key: &str, html: &str) -> Result<()>;

    /// Read a page template, `None` if it does not exist.
    async fn load_template(&self, key: &str) -> Result<Option<String>>;
}
