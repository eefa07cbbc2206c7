//! Filesystem capability port.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// The filesystem operations the install pipeline depends on.
///
/// Kept as a single capability so tests can substitute an in-memory tree.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Whether `path` exists and is a directory.
    async fn dir_exists(&self, path: &Path) -> bool;

    /// Immediate subdirectories of `path` whose names start with `prefix`,
    /// sorted by name.
    async fn list_dirs_with_prefix(&self, path: &Path, prefix: &str)
    -> anyhow::Result<Vec<PathBuf>>;

    /// Create `path` and all missing parents. Succeeds if it already exists.
    async fn create_dir_all(&self, path: &Path) -> anyhow::Result<()>;

    async fn remove_file(&self, path: &Path) -> anyhow::Result<()>;

    async fn read_to_string(&self, path: &Path) -> anyhow::Result<String>;

    /// A fresh path in the temporary directory that no other call will return.
    /// The file itself is not created.
    async fn temp_file_path(&self) -> anyhow::Result<PathBuf>;
}
