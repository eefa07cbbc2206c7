//! Feed configuration.
//!
//! Runtime archives are served from two feeds: a CDN-fronted "cached" feed
//! for the archives themselves and an "uncached" origin feed that carries the
//! authoritative `latest.version` pointers.

use url::Url;

use crate::error::InstallError;

/// Default CDN-fronted feed serving runtime archives.
pub const DEFAULT_CACHED_FEED: &str = "https://dotnetcli.azureedge.net/dotnet";

/// Default origin feed serving `latest.version` pointer files.
pub const DEFAULT_UNCACHED_FEED: &str = "https://dotnetcli.blob.core.windows.net/dotnet";

/// Base URLs of the feeds used by an install.
///
/// # Example
///
/// ```
/// use sharedrt_core::FeedConfig;
///
/// let feeds = FeedConfig::new().with_cached_feed("https://mirror.example.com/dotnet");
/// assert!(feeds.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// Feed serving runtime archives
    pub cached_feed: String,
    /// Feed serving `latest.version` pointers
    pub uncached_feed: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            cached_feed: DEFAULT_CACHED_FEED.to_string(),
            uncached_feed: DEFAULT_UNCACHED_FEED.to_string(),
        }
    }
}

impl FeedConfig {
    /// Create a configuration pointing at the public feeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the feed serving runtime archives.
    #[must_use]
    pub fn with_cached_feed(mut self, url: impl Into<String>) -> Self {
        self.cached_feed = url.into();
        self
    }

    /// Set the feed serving `latest.version` pointers.
    #[must_use]
    pub fn with_uncached_feed(mut self, url: impl Into<String>) -> Self {
        self.uncached_feed = url.into();
        self
    }

    /// Check that both feeds are absolute http(s) URLs.
    pub fn validate(&self) -> Result<(), InstallError> {
        validate_feed(&self.cached_feed)?;
        validate_feed(&self.uncached_feed)
    }
}

fn validate_feed(feed: &str) -> Result<(), InstallError> {
    let parsed = Url::parse(feed).map_err(|e| InstallError::InvalidFeed {
        url: feed.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(InstallError::InvalidFeed {
            url: feed.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}
