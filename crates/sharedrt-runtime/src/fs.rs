//! Local filesystem adapter.

use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use sharedrt_core::FileSystem;
use tokio::fs;
use uuid::Uuid;

/// Prefix of temp file names handed out by [`LocalFileSystem`].
const TEMP_PREFIX: &str = "sharedrt-";

/// [`FileSystem`] backed by the real disk through `tokio::fs`.
#[derive(Debug, Clone)]
pub struct LocalFileSystem {
    temp_dir: PathBuf,
}

impl Default for LocalFileSystem {
    fn default() -> Self {
        Self {
            temp_dir: std::env::temp_dir(),
        }
    }
}

impl LocalFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out temp paths under `dir` instead of the system temp directory.
    #[must_use]
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }
}

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn dir_exists(&self, path: &Path) -> bool {
        fs::metadata(path).await.is_ok_and(|m| m.is_dir())
    }

    async fn list_dirs_with_prefix(
        &self,
        path: &Path,
        prefix: &str,
    ) -> anyhow::Result<Vec<PathBuf>> {
        let mut read_dir = fs::read_dir(path)
            .await
            .with_context(|| format!("Failed to list {}", path.display()))?;

        let mut matches = Vec::new();
        while let Some(entry) = read_dir.next_entry().await? {
            if !entry.file_name().to_string_lossy().starts_with(prefix) {
                continue;
            }
            // Follows symlinks, like `dir_exists`
            let path = entry.path();
            if fs::metadata(&path).await.is_ok_and(|m| m.is_dir()) {
                matches.push(path);
            }
        }

        matches.sort();
        Ok(matches)
    }

    async fn create_dir_all(&self, path: &Path) -> anyhow::Result<()> {
        fs::create_dir_all(path)
            .await
            .with_context(|| format!("Failed to create directory {}", path.display()))
    }

    async fn remove_file(&self, path: &Path) -> anyhow::Result<()> {
        fs::remove_file(path)
            .await
            .with_context(|| format!("Failed to delete {}", path.display()))
    }

    async fn read_to_string(&self, path: &Path) -> anyhow::Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))
    }

    async fn temp_file_path(&self) -> anyhow::Result<PathBuf> {
        Ok(self
            .temp_dir
            .join(format!("{TEMP_PREFIX}{}", Uuid::new_v4().simple())))
    }
}
