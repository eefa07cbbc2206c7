//! Standalone shared runtime installation.
//!
//! [`StandaloneInstaller::install`] runs one install request end to end:
//!
//! 1. existence check on the literal requested version (before any network)
//! 2. version resolution (may fetch `latest.version`)
//! 3. existence check on the exact version directory
//! 4. download, extract, verify, clean up
//!
//! Steps run strictly in sequence and the first failure aborts the rest.
//! The temporary archive is removed on the success path only.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, info};

use crate::assets::AssetDescriptor;
use crate::domain::{InstallOutcome, InstallRequest, RequestedVersion};
use crate::error::{InstallError, InstallResult};
use crate::ports::{Downloader, Extractor, FileSystem};
use crate::resolver::{DistributionResolver, build_download_url, build_install_path};

/// Installs shared runtimes through injected collaborators.
///
/// Holds no per-call state, so one installer can serve concurrent requests
/// as long as they target different install paths.
#[derive(Clone)]
pub struct StandaloneInstaller {
    downloader: Arc<dyn Downloader>,
    extractor: Arc<dyn Extractor>,
    fs: Arc<dyn FileSystem>,
}

impl StandaloneInstaller {
    pub fn new(
        downloader: Arc<dyn Downloader>,
        extractor: Arc<dyn Extractor>,
        fs: Arc<dyn FileSystem>,
    ) -> Self {
        Self {
            downloader,
            extractor,
            fs,
        }
    }

    /// Install the requested runtime, or report that it is already present.
    ///
    /// Domain failures are returned as their own variants; any other failure
    /// is wrapped exactly once as [`InstallError::Unexpected`].
    pub async fn install(&self, request: &InstallRequest) -> InstallResult<InstallOutcome> {
        self.run(request)
            .await
            .map_err(InstallError::from_pipeline)
    }

    async fn run(&self, request: &InstallRequest) -> anyhow::Result<InstallOutcome> {
        let asset = AssetDescriptor::resolve(request.runtime, request.platform)?;
        let package_root = asset.package_root(request.install_dir());

        // Shape is checked up front so an empty or malformed request can never
        // match existing directories by prefix.
        RequestedVersion::parse(&request.version)?;

        if !request.force {
            let existing = self
                .find_installed_prefix(&package_root, &request.version)
                .await?;
            if let Some(existing) = existing {
                let message = format!(
                    "{} {} is already installed at {}",
                    asset.name,
                    dir_name(&existing),
                    existing.display()
                );
                info!(runtime = %request.runtime, path = %existing.display(), "Skipping install");
                request.log(&message);
                return Ok(InstallOutcome::AlreadyInstalled { path: existing });
            }
        }

        let resolver = DistributionResolver::new(self.downloader.as_ref(), self.fs.as_ref());
        let resolved = resolver.resolve(request, &asset).await?;
        let version = resolved.version;

        let url = build_download_url(request, &asset, &request.feeds.cached_feed, &version);
        let install_path = build_install_path(request.install_dir(), &asset, &version);

        if !request.force && self.fs.dir_exists(&install_path).await {
            info!(%version, path = %install_path.display(), "Skipping install");
            request.log(&format!(
                "{} {version} is already installed at {}",
                asset.name,
                install_path.display()
            ));
            return Ok(InstallOutcome::AlreadyInstalled { path: install_path });
        }

        request.log(&format!(
            "Installing {} {version} ({}-{}) to {}",
            asset.name,
            request.platform,
            request.architecture,
            install_path.display()
        ));
        info!(
            runtime = %request.runtime,
            platform = %request.platform,
            arch = %request.architecture,
            %version,
            path = %install_path.display(),
            "Installing shared runtime"
        );

        self.fs
            .create_dir_all(request.install_dir())
            .await
            .with_context(|| {
                format!(
                    "Failed to create install directory {}",
                    request.install_dir().display()
                )
            })?;

        let archive = with_extension(self.fs.temp_file_path().await?, asset.archive_extension);

        debug!(%url, archive = %archive.display(), "Downloading archive");
        self.downloader
            .download(&url, &archive)
            .await
            .with_context(|| format!("Failed to download {url}"))?;

        debug!(archive = %archive.display(), force = request.force, "Extracting archive");
        self.extractor
            .extract(&archive, request.install_dir(), request.force)
            .await
            .with_context(|| format!("Failed to extract {}", archive.display()))?;

        if !self.fs.dir_exists(&install_path).await {
            return Err(InstallError::VerificationFailed {
                asset: asset.name.to_string(),
                version,
            }
            .into());
        }

        self.fs.remove_file(&archive).await?;

        info!(%version, path = %install_path.display(), "Shared runtime installed");
        request.log(&format!("Installed {} {version}", asset.name));

        Ok(InstallOutcome::Installed {
            version,
            path: install_path,
        })
    }

    /// First existing version directory whose name starts with the literal
    /// requested version (`2.1` matches `2.1.6`).
    async fn find_installed_prefix(
        &self,
        package_root: &Path,
        requested: &str,
    ) -> anyhow::Result<Option<PathBuf>> {
        if !self.fs.dir_exists(package_root).await {
            return Ok(None);
        }

        let matches = self
            .fs
            .list_dirs_with_prefix(package_root, requested)
            .await?;
        debug!(
            root = %package_root.display(),
            requested,
            found = matches.len(),
            "Checked existing installs"
        );

        Ok(matches.into_iter().next())
    }
}

/// Append `.ext` to a path without replacing any existing extension.
fn with_extension(path: PathBuf, extension: &str) -> PathBuf {
    let mut raw: OsString = path.into_os_string();
    raw.push(".");
    raw.push(extension);
    PathBuf::from(raw)
}

fn dir_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
