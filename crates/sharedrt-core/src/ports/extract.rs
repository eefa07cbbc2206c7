//! Extractor port.

use async_trait::async_trait;
use std::path::Path;

/// Expands an archive into a directory.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Expand every non-directory entry of `archive` into `destination`,
    /// creating intermediate directories as needed.
    ///
    /// With `overwrite` set, existing files are replaced; otherwise the
    /// implementation's collision policy applies.
    async fn extract(&self, archive: &Path, destination: &Path, overwrite: bool)
    -> anyhow::Result<()>;
}
