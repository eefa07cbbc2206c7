//! Error taxonomy for shared runtime installation.
//!
//! Every failure of an install call surfaces as exactly one [`InstallError`].
//! Domain variants are raised directly by resolution and verification;
//! anything else (network, filesystem, archive library) is carried by
//! [`InstallError::Unexpected`] with the original cause chain intact.

use thiserror::Error;

/// Result type alias for install operations.
pub type InstallResult<T> = Result<T, InstallError>;

/// Errors that can occur while resolving or installing a shared runtime.
#[derive(Debug, Error)]
pub enum InstallError {
    /// The requested version is neither `major.minor` nor `major.minor.patch`.
    #[error(
        "Invalid version '{version}': expected a version of the form 'major.minor' or 'major.minor.patch'"
    )]
    MalformedVersion {
        /// The version string exactly as requested
        version: String,
    },

    /// The runtime kind is not one of the supported runtimes.
    #[error("Unsupported runtime '{value}': expected 'dotnet' or 'aspnet'")]
    UnsupportedRuntimeKind {
        /// The rejected value
        value: String,
    },

    /// The platform has no published archives.
    #[error("Unsupported platform '{value}'")]
    UnsupportedPlatform {
        /// The rejected value
        value: String,
    },

    /// The architecture has no published archives.
    #[error("Unsupported architecture '{value}': expected 'x64' or 'x86'")]
    UnsupportedArchitecture {
        /// The rejected value
        value: String,
    },

    /// A feed base URL is not a usable http(s) URL.
    #[error("Invalid feed URL '{url}': {reason}")]
    InvalidFeed {
        /// The configured feed
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// Extraction reported success but the versioned directory is missing.
    #[error(
        "{asset} {version} failed to install: the archive did not produce the expected directory"
    )]
    VerificationFailed {
        /// Display name of the asset
        asset: String,
        /// Concrete version that was being installed
        version: String,
    },

    /// Any other failure encountered during the install pipeline.
    #[error("Unexpected error while installing shared runtime")]
    Unexpected(#[source] anyhow::Error),
}

impl InstallError {
    /// Create a `MalformedVersion` error.
    pub fn malformed_version(version: impl Into<String>) -> Self {
        Self::MalformedVersion {
            version: version.into(),
        }
    }

    /// Whether this error is one of the domain kinds rather than a wrapped cause.
    pub const fn is_domain(&self) -> bool {
        !matches!(self, Self::Unexpected(_))
    }

    /// Classify an error raised inside the install pipeline.
    ///
    /// Domain errors travel through `anyhow` untouched and are recovered here;
    /// everything else is wrapped once as `Unexpected`.
    pub(crate) fn from_pipeline(err: anyhow::Error) -> Self {
        match err.downcast::<Self>() {
            Ok(domain) => domain,
            Err(other) => Self::Unexpected(other),
        }
    }
}
