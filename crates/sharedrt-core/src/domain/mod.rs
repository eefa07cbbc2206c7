//! Domain types for shared runtime installs.

mod platform;
mod request;
mod version;

pub use platform::{Architecture, Platform, RuntimeKind};
pub use request::{InstallRequest, LogSink};
pub use version::{RequestedVersion, ResolvedVersion};

use std::path::PathBuf;

/// Terminal state of a successful install call.
///
/// Failures are reported as `Err(InstallError)` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// A matching version was already present; nothing was downloaded.
    AlreadyInstalled {
        /// The existing version directory.
        path: PathBuf,
    },
    /// The runtime was downloaded and extracted.
    Installed {
        /// Concrete version that was installed.
        version: String,
        /// The version directory that now exists.
        path: PathBuf,
    },
}

impl InstallOutcome {
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::AlreadyInstalled { .. })
    }
}
