#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod download;
mod extract;
mod fs;

pub use download::{
    DownloadError, DownloadProgressCallback, HttpDownloader, HttpDownloaderConfig,
};
pub use extract::{
    ArchiveExtractor, ArchiveFormat, ExtractError, ExtractSummary, extract_archive,
};
pub use fs::LocalFileSystem;
