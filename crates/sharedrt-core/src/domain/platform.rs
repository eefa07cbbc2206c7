//! Closed enumerations for the platform / architecture / runtime tuple.
//!
//! Inputs arrive as free-form strings (command line, environment) and are
//! case-normalised and validated here, so the rest of the crate only ever
//! sees values it knows how to name.

use std::fmt;
use std::str::FromStr;

use crate::error::InstallError;

/// Operating system a runtime archive is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
    Android,
}

impl Platform {
    /// Parse a platform name, ignoring case.
    pub fn parse(input: &str) -> Result<Self, InstallError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "win" | "windows" => Ok(Self::Windows),
            "linux" => Ok(Self::Linux),
            "osx" | "macos" | "darwin" => Ok(Self::MacOs),
            "android" => Ok(Self::Android),
            _ => Err(InstallError::UnsupportedPlatform {
                value: input.to_string(),
            }),
        }
    }

    /// Token used in archive file names on the feed.
    pub const fn as_rid(self) -> &'static str {
        match self {
            Self::Windows => "win",
            Self::Linux => "linux",
            Self::MacOs => "osx",
            Self::Android => "android",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_rid())
    }
}

impl FromStr for Platform {
    type Err = InstallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// CPU architecture a runtime archive is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    X64,
    X86,
}

impl Architecture {
    /// Parse an architecture name, ignoring case.
    pub fn parse(input: &str) -> Result<Self, InstallError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "x64" | "amd64" | "x86_64" => Ok(Self::X64),
            "x86" | "i386" | "i686" => Ok(Self::X86),
            _ => Err(InstallError::UnsupportedArchitecture {
                value: input.to_string(),
            }),
        }
    }

    /// Token used in archive file names on the feed.
    pub const fn as_rid(self) -> &'static str {
        match self {
            Self::X64 => "x64",
            Self::X86 => "x86",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_rid())
    }
}

impl FromStr for Architecture {
    type Err = InstallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Which shared runtime to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeKind {
    /// The base runtime (`dotnet`).
    CoreRuntime,
    /// The web framework runtime layered on top (`aspnet`).
    WebRuntime,
}

impl RuntimeKind {
    /// Parse a runtime name as accepted on the command line.
    pub fn parse(input: &str) -> Result<Self, InstallError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "dotnet" => Ok(Self::CoreRuntime),
            "aspnet" | "aspnetcore" => Ok(Self::WebRuntime),
            _ => Err(InstallError::UnsupportedRuntimeKind {
                value: input.to_string(),
            }),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CoreRuntime => "dotnet",
            Self::WebRuntime => "aspnet",
        }
    }
}

impl fmt::Display for RuntimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuntimeKind {
    type Err = InstallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
