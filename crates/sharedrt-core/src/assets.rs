//! Naming facts for each runtime asset.
//!
//! These are pure functions of (runtime, platform): display name, where
//! versions live under the install directory, archive extension, and the URL
//! layout on the feeds.

use std::path::{Path, PathBuf};

use crate::domain::{Architecture, Platform, RuntimeKind};
use crate::error::InstallError;

/// Name of the pointer file published per channel on the uncached feed.
const LATEST_VERSION_FILE: &str = "latest.version";

/// Derived naming facts for one runtime on one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDescriptor {
    /// Human-readable asset name (also the shared framework directory name).
    pub name: &'static str,
    /// Path under the install directory where versions of this asset live.
    pub relative_path: PathBuf,
    /// Archive file extension without the leading dot.
    pub archive_extension: &'static str,
    /// Feed path segment under which this asset is published.
    pub feed_segment: &'static str,
    /// Archive file name prefix.
    pub file_prefix: &'static str,
}

impl AssetDescriptor {
    /// Resolve the descriptor for a runtime on a platform.
    ///
    /// Fails with `UnsupportedPlatform` for platforms without published archives.
    pub fn resolve(runtime: RuntimeKind, platform: Platform) -> Result<Self, InstallError> {
        let archive_extension = match platform {
            Platform::Windows => "zip",
            Platform::Linux | Platform::MacOs => "tar.gz",
            Platform::Android => {
                return Err(InstallError::UnsupportedPlatform {
                    value: platform.to_string(),
                });
            }
        };

        let (name, feed_segment, file_prefix) = match runtime {
            RuntimeKind::CoreRuntime => ("Microsoft.NETCore.App", "Runtime", "dotnet-runtime"),
            RuntimeKind::WebRuntime => (
                "Microsoft.AspNetCore.App",
                "aspnetcore/Runtime",
                "aspnetcore-runtime",
            ),
        };

        Ok(Self {
            name,
            relative_path: Path::new("shared").join(name),
            archive_extension,
            feed_segment,
            file_prefix,
        })
    }

    /// Archive file name for a concrete version.
    pub fn archive_file_name(
        &self,
        version: &str,
        platform: Platform,
        architecture: Architecture,
    ) -> String {
        format!(
            "{}-{version}-{}-{}.{}",
            self.file_prefix,
            platform.as_rid(),
            architecture.as_rid(),
            self.archive_extension
        )
    }

    /// URL of the archive for a concrete version.
    pub fn download_url(
        &self,
        feed: &str,
        version: &str,
        platform: Platform,
        architecture: Architecture,
    ) -> String {
        format!(
            "{}/{}/{version}/{}",
            feed.trim_end_matches('/'),
            self.feed_segment,
            self.archive_file_name(version, platform, architecture)
        )
    }

    /// URL of the `latest.version` pointer for a `major.minor` channel.
    pub fn latest_version_url(&self, feed: &str, channel: &str) -> String {
        format!(
            "{}/{}/{channel}/{LATEST_VERSION_FILE}",
            feed.trim_end_matches('/'),
            self.feed_segment
        )
    }

    /// Directory holding every installed version of this asset.
    pub fn package_root(&self, install_dir: &Path) -> PathBuf {
        install_dir.join(&self.relative_path)
    }
}
