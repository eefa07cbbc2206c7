//! Archive extraction for runtime packages.
//!
//! Windows runtimes ship as `.zip`, macOS and Linux runtimes as `.tar.gz`.
//! Both are expanded relative to the install directory: the archives carry
//! the `shared/<asset>/<version>/` layout themselves.

use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use flate2::read::GzDecoder;
use sharedrt_core::Extractor;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while expanding an archive.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The file name does not identify a supported archive format.
    #[error("Unsupported archive format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// An entry would be written outside the destination directory.
    #[error("Archive entry escapes the destination directory: {name}")]
    UnsafeEntry { name: String },

    #[error("Failed to read zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The blocking extraction task panicked or was cancelled.
    #[error("Extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ExtractError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Supported archive formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
}

impl ArchiveFormat {
    /// Infer the format from the archive file name.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().to_ascii_lowercase();
        if name.ends_with(".zip") {
            return Some(Self::Zip);
        }
        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            return Some(Self::TarGz);
        }
        None
    }
}

/// What an extraction did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Files written to the destination.
    pub written: usize,
    /// Files left untouched because they already existed.
    pub skipped: usize,
}

/// Expand `archive` into `destination`.
///
/// Directory entries are not materialised on their own; parents are created
/// for every file. Without `overwrite`, files that already exist are kept.
pub fn extract_archive(
    archive: &Path,
    destination: &Path,
    overwrite: bool,
) -> Result<ExtractSummary, ExtractError> {
    let format = ArchiveFormat::from_path(archive).ok_or_else(|| ExtractError::UnsupportedFormat {
        path: archive.to_path_buf(),
    })?;

    fs::create_dir_all(destination).map_err(ExtractError::io(destination))?;

    match format {
        ArchiveFormat::Zip => extract_zip(archive, destination, overwrite),
        ArchiveFormat::TarGz => extract_tar_gz(archive, destination, overwrite),
    }
}

fn extract_zip(
    archive_path: &Path,
    destination: &Path,
    overwrite: bool,
) -> Result<ExtractSummary, ExtractError> {
    let file = File::open(archive_path).map_err(ExtractError::io(archive_path))?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut summary = ExtractSummary::default();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }

        let relative = entry.enclosed_name().ok_or_else(|| ExtractError::UnsafeEntry {
            name: entry.name().to_string(),
        })?;
        let dest_path = destination.join(relative);

        if !overwrite && dest_path.exists() {
            warn!(path = %dest_path.display(), "File exists, leaving it in place");
            summary.skipped += 1;
            continue;
        }

        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent).map_err(ExtractError::io(parent))?;
        }

        let mut dest_file = File::create(&dest_path).map_err(ExtractError::io(&dest_path))?;
        io::copy(&mut entry, &mut dest_file).map_err(ExtractError::io(&dest_path))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&dest_path, fs::Permissions::from_mode(mode))
                .map_err(ExtractError::io(&dest_path))?;
        }

        summary.written += 1;
    }

    Ok(summary)
}

fn extract_tar_gz(
    archive_path: &Path,
    destination: &Path,
    overwrite: bool,
) -> Result<ExtractSummary, ExtractError> {
    let file = File::open(archive_path).map_err(ExtractError::io(archive_path))?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));
    archive.set_overwrite(true);
    archive.set_preserve_permissions(true);

    let mut summary = ExtractSummary::default();
    let entries = archive.entries().map_err(ExtractError::io(archive_path))?;

    for entry in entries {
        let mut entry = entry.map_err(ExtractError::io(archive_path))?;
        let kind = entry.header().entry_type();
        if kind.is_dir() || kind.is_pax_global_extensions() {
            continue;
        }

        let relative = entry
            .path()
            .map_err(ExtractError::io(archive_path))?
            .into_owned();
        if !is_enclosed(&relative) {
            return Err(ExtractError::UnsafeEntry {
                name: relative.display().to_string(),
            });
        }
        let dest_path = destination.join(&relative);

        if !overwrite && fs::symlink_metadata(&dest_path).is_ok() {
            warn!(path = %dest_path.display(), "File exists, leaving it in place");
            summary.skipped += 1;
            continue;
        }

        // unpack_in creates missing parents and refuses paths outside `destination`.
        let unpacked = entry
            .unpack_in(destination)
            .map_err(ExtractError::io(&dest_path))?;
        if !unpacked {
            return Err(ExtractError::UnsafeEntry {
                name: relative.display().to_string(),
            });
        }

        summary.written += 1;
    }

    Ok(summary)
}

/// Whether a relative entry path stays under the directory it is joined to.
fn is_enclosed(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// [`Extractor`] that expands archives on the blocking thread pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArchiveExtractor;

impl ArchiveExtractor {
    pub const fn new() -> Self {
        Self
    }

    /// Expand an archive without blocking the async runtime.
    pub async fn extract_async(
        &self,
        archive: &Path,
        destination: &Path,
        overwrite: bool,
    ) -> Result<ExtractSummary, ExtractError> {
        let archive = archive.to_path_buf();
        let destination = destination.to_path_buf();

        let summary = tokio::task::spawn_blocking(move || {
            extract_archive(&archive, &destination, overwrite)
        })
        .await??;

        debug!(
            written = summary.written,
            skipped = summary.skipped,
            "Archive extracted"
        );
        Ok(summary)
    }
}

#[async_trait]
impl Extractor for ArchiveExtractor {
    async fn extract(
        &self,
        archive: &Path,
        destination: &Path,
        overwrite: bool,
    ) -> anyhow::Result<()> {
        self.extract_async(archive, destination, overwrite).await?;
        Ok(())
    }
}
