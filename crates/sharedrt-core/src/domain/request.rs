//! The immutable input of one install call.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::platform::{Architecture, Platform, RuntimeKind};
use crate::config::FeedConfig;

/// Receives human-readable progress lines during an install.
pub type LogSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Everything needed to install one shared runtime.
///
/// Built once per install call with [`InstallRequest::new`] and the `with_*`
/// methods, then only read.
#[derive(Clone)]
pub struct InstallRequest {
    /// Root of the runtime installation (the directory holding `shared/`).
    pub install_dir: PathBuf,
    /// Target platform.
    pub platform: Platform,
    /// Target architecture.
    pub architecture: Architecture,
    /// Version exactly as requested (`major.minor` or `major.minor.patch`).
    pub version: String,
    /// Which runtime to install.
    pub runtime: RuntimeKind,
    /// Feed base URLs.
    pub feeds: FeedConfig,
    /// Reinstall even when a matching version is already present.
    pub force: bool,
    /// Optional progress sink; `None` means silent.
    pub log: Option<LogSink>,
}

impl InstallRequest {
    /// Create a request against the default feeds.
    pub fn new(
        install_dir: impl Into<PathBuf>,
        platform: Platform,
        architecture: Architecture,
        runtime: RuntimeKind,
        version: impl Into<String>,
    ) -> Self {
        Self {
            install_dir: install_dir.into(),
            platform,
            architecture,
            version: version.into(),
            runtime,
            feeds: FeedConfig::default(),
            force: false,
            log: None,
        }
    }

    /// Replace both feeds.
    #[must_use]
    pub fn with_feeds(mut self, feeds: FeedConfig) -> Self {
        self.feeds = feeds;
        self
    }

    /// Set the feed serving runtime archives.
    #[must_use]
    pub fn with_cached_feed(mut self, url: impl Into<String>) -> Self {
        self.feeds.cached_feed = url.into();
        self
    }

    /// Set the feed serving `latest.version` pointers.
    #[must_use]
    pub fn with_uncached_feed(mut self, url: impl Into<String>) -> Self {
        self.feeds.uncached_feed = url.into();
        self
    }

    #[must_use]
    pub const fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Attach a progress sink.
    #[must_use]
    pub fn with_log_sink(mut self, sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.log = Some(Arc::new(sink));
        self
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    /// Forward a message to the sink, if any.
    pub(crate) fn log(&self, message: &str) {
        if let Some(ref sink) = self.log {
            sink(message);
        }
    }
}

impl fmt::Debug for InstallRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstallRequest")
            .field("install_dir", &self.install_dir)
            .field("platform", &self.platform)
            .field("architecture", &self.architecture)
            .field("version", &self.version)
            .field("runtime", &self.runtime)
            .field("feeds", &self.feeds)
            .field("force", &self.force)
            .field("log", &self.log.as_ref().map(|_| "<sink>"))
            .finish()
    }
}
