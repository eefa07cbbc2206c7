//! Distribution resolution: concrete version, download URL and install path.
//!
//! URL and path construction are pure. Only resolving a `major.minor`
//! channel touches the outside world, through one fetch of the channel's
//! `latest.version` pointer on the uncached feed.

use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use tracing::debug;

use crate::assets::AssetDescriptor;
use crate::domain::{InstallRequest, RequestedVersion, ResolvedVersion};
use crate::error::{InstallError, InstallResult};
use crate::ports::{Downloader, FileSystem};

/// Resolves requested versions against the feeds.
pub struct DistributionResolver<'a> {
    downloader: &'a dyn Downloader,
    fs: &'a dyn FileSystem,
}

impl<'a> DistributionResolver<'a> {
    pub fn new(downloader: &'a dyn Downloader, fs: &'a dyn FileSystem) -> Self {
        Self { downloader, fs }
    }

    /// Resolve the requested version to a concrete `major.minor.patch`.
    ///
    /// Three-component requests are returned unchanged without any network
    /// access. Two-component requests are looked up in the channel's
    /// `latest.version` pointer on the uncached feed.
    pub async fn resolve_version(
        &self,
        request: &InstallRequest,
        asset: &AssetDescriptor,
    ) -> InstallResult<ResolvedVersion> {
        self.resolve(request, asset)
            .await
            .map_err(InstallError::from_pipeline)
    }

    pub(crate) async fn resolve(
        &self,
        request: &InstallRequest,
        asset: &AssetDescriptor,
    ) -> anyhow::Result<ResolvedVersion> {
        let channel = match RequestedVersion::parse(&request.version)? {
            RequestedVersion::Concrete(version) => return Ok(ResolvedVersion::exact(version)),
            RequestedVersion::Channel(channel) => channel,
        };

        let url = asset.latest_version_url(&request.feeds.uncached_feed, &channel);
        let pointer_path = self.fs.temp_file_path().await?;
        debug!(%url, path = %pointer_path.display(), "Fetching latest version pointer");

        self.downloader
            .download(&url, &pointer_path)
            .await
            .with_context(|| format!("Failed to fetch latest version from {url}"))?;

        let content = self.fs.read_to_string(&pointer_path).await?;
        if let Err(e) = self.fs.remove_file(&pointer_path).await {
            debug!(path = %pointer_path.display(), error = %e, "Could not delete version pointer");
        }
        let resolved = parse_latest_version(&content)
            .ok_or_else(|| anyhow!("Malformed latest.version file at {url}"))?;

        let commit = resolved.commit.as_deref().unwrap_or_default();
        debug!(%channel, version = %resolved.version, commit, "Resolved channel");
        request.log(&format!(
            "Resolved {} {channel} to version {} (commit {commit})",
            asset.name, resolved.version
        ));

        Ok(resolved)
    }
}

/// Parse a `latest.version` pointer: a commit hash followed by the version,
/// separated by whitespace.
pub fn parse_latest_version(content: &str) -> Option<ResolvedVersion> {
    let mut tokens = content.split_whitespace();
    let commit = tokens.next()?;
    let version = tokens.next()?;
    Some(ResolvedVersion {
        version: version.to_string(),
        commit: Some(commit.to_string()),
    })
}

/// URL of the archive to download, on the given feed.
pub fn build_download_url(
    request: &InstallRequest,
    asset: &AssetDescriptor,
    feed: &str,
    version: &str,
) -> String {
    asset.download_url(feed, version, request.platform, request.architecture)
}

/// `install_dir / asset.relative_path / version`
pub fn build_install_path(install_dir: &Path, asset: &AssetDescriptor, version: &str) -> PathBuf {
    asset.package_root(install_dir).join(version)
}
