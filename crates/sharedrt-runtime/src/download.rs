//! HTTP download of runtime archives and version pointers.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use sharedrt_core::Downloader;
use thiserror::Error;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Thread-safe progress callback, called with (`downloaded_bytes`, `total_bytes`).
///
/// `total_bytes` is 0 when the server sent no content length.
pub type DownloadProgressCallback = Box<dyn Fn(u64, u64) + Send + Sync>;

/// Errors raised by [`HttpDownloader`].
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The server answered with a non-success status.
    #[error("Download failed: HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Request could not be sent or the body could not be read.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Writing the destination file failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration for [`HttpDownloader`].
#[derive(Debug, Clone)]
pub struct HttpDownloaderConfig {
    /// User agent sent with every request
    pub(crate) user_agent: String,
    /// Connection establishment timeout
    pub(crate) connect_timeout: Duration,
    /// Whole-request timeout; `None` lets large archives take as long as needed
    pub(crate) timeout: Option<Duration>,
}

impl Default for HttpDownloaderConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("sharedrt/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout: Duration::from_secs(30),
            timeout: None,
        }
    }
}

impl HttpDownloaderConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Limit the total time of each request.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Downloads over HTTP(S), streaming the body straight to disk.
pub struct HttpDownloader {
    client: reqwest::Client,
    progress: Option<DownloadProgressCallback>,
}

impl HttpDownloader {
    pub fn new(config: &HttpDownloaderConfig) -> Result<Self, DownloadError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            progress: None,
        })
    }

    /// Report byte progress of every download to `callback`.
    #[must_use]
    pub fn with_progress(mut self, callback: DownloadProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Download `url` into `dest`, creating parent directories.
    pub async fn fetch_to_file(&self, url: &str, dest: &Path) -> Result<u64, DownloadError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let total_size = response.content_length().unwrap_or(0);
        debug!(url, total_size, dest = %dest.display(), "Starting download");

        let io_err = |source| DownloadError::Io {
            path: dest.to_path_buf(),
            source,
        };

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).await.map_err(io_err)?;
        }
        let mut file = File::create(dest).await.map_err(io_err)?;

        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await.map_err(io_err)?;
            downloaded += chunk.len() as u64;

            if let Some(ref cb) = self.progress {
                cb(downloaded, total_size);
            }
        }
        file.flush().await.map_err(io_err)?;

        debug!(url, downloaded, "Download complete");
        Ok(downloaded)
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download(&self, url: &str, destination: &Path) -> anyhow::Result<()> {
        self.fetch_to_file(url, destination).await?;
        Ok(())
    }
}
