//! Host platform detection.

use sharedrt_core::{Architecture, InstallError, Platform};

/// Platform of the running host.
pub fn host_platform() -> Result<Platform, InstallError> {
    Platform::parse(std::env::consts::OS)
}

/// Architecture of the running host.
///
/// Fails on hosts without published runtime archives (e.g. `aarch64`).
pub fn host_architecture() -> Result<Architecture, InstallError> {
    Architecture::parse(std::env::consts::ARCH)
}
