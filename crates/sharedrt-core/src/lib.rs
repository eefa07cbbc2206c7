#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod assets;
pub mod config;
pub mod domain;
pub mod error;
pub mod installer;
pub mod ports;
pub mod resolver;

// Re-export commonly used types for convenience
pub use assets::AssetDescriptor;
pub use config::{DEFAULT_CACHED_FEED, DEFAULT_UNCACHED_FEED, FeedConfig};
pub use domain::{
    Architecture, InstallOutcome, InstallRequest, LogSink, Platform, RequestedVersion,
    ResolvedVersion, RuntimeKind,
};
pub use error::{InstallError, InstallResult};
pub use installer::StandaloneInstaller;
pub use ports::{Downloader, Extractor, FileSystem};
pub use resolver::{
    DistributionResolver, build_download_url, build_install_path, parse_latest_version,
};
