//! Port definitions (trait abstractions) for external systems.
//!
//! The orchestrator never touches the network, archives or the disk directly.
//! Each capability sits behind one trait so that adapters (see
//! `sharedrt-runtime`) and test doubles are interchangeable.
//!
//! # Design Rules
//!
//! - No reqwest/zip/tokio types in any signature
//! - Ports return `anyhow::Result`; the orchestrator wraps failures once
//! - Paths are plain `std::path` values; joining is left to `Path::join`

pub mod download;
pub mod extract;
pub mod filesystem;

pub use download::Downloader;
pub use extract::Extractor;
pub use filesystem::FileSystem;

#[cfg(test)]
pub use download::MockDownloader;
#[cfg(test)]
pub use filesystem::MockFileSystem;
