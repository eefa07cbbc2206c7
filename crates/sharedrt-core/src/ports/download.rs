//! Downloader port.

use async_trait::async_trait;
use std::path::Path;

/// Fetches a URL into a local file.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Write the complete response body of `url` to `destination`,
    /// creating or overwriting the file.
    ///
    /// Failures must be surfaced, never swallowed.
    async fn download(&self, url: &str, destination: &Path) -> anyhow::Result<()>;
}
