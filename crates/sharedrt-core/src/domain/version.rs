//! Requested and resolved runtime versions.

use std::fmt;

use crate::error::InstallError;

/// A version as requested by the caller, classified by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestedVersion {
    /// `major.minor.patch`: installed exactly as given.
    Concrete(String),
    /// `major.minor`: resolved to the latest patch published in the series.
    Channel(String),
}

impl RequestedVersion {
    /// Classify a version string.
    ///
    /// Exactly two or three non-empty dot-separated components are accepted.
    /// Components are not required to be numeric.
    pub fn parse(input: &str) -> Result<Self, InstallError> {
        let components: Vec<&str> = input.split('.').collect();
        if components.iter().any(|c| c.is_empty()) {
            return Err(InstallError::malformed_version(input));
        }

        match components.len() {
            3 => Ok(Self::Concrete(input.to_string())),
            2 => Ok(Self::Channel(input.to_string())),
            _ => Err(InstallError::malformed_version(input)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Concrete(v) | Self::Channel(v) => v,
        }
    }
}

impl fmt::Display for RequestedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete three-component version ready to be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    /// The concrete `major.minor.patch` version.
    pub version: String,
    /// Commit hash published alongside the version, when resolved from a channel.
    pub commit: Option<String>,
}

impl ResolvedVersion {
    /// A version that needed no resolution.
    pub fn exact(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            commit: None,
        }
    }
}
