//! Command handlers.
//!
//! Each handler wires the runtime adapters into the core and reports the
//! outcome. Errors are returned to `main`, which prints them.

pub mod install;
pub mod resolve;

use std::path::Path;

use sharedrt_core::{Architecture, InstallError, InstallRequest, Platform, RuntimeKind};

use crate::commands::TargetArgs;
use crate::host;
use crate::parser::FeedArgs;

/// Turn command-line values into an install request.
///
/// Platform and architecture fall back to the host when not given.
pub fn build_request(
    target: &TargetArgs,
    install_dir: &Path,
    feeds: &FeedArgs,
) -> Result<InstallRequest, InstallError> {
    let runtime = RuntimeKind::parse(&target.runtime)?;
    let platform = match target.platform.as_deref() {
        Some(value) => Platform::parse(value)?,
        None => host::host_platform()?,
    };
    let architecture = match target.architecture.as_deref() {
        Some(value) => Architecture::parse(value)?,
        None => host::host_architecture()?,
    };

    let feeds = feeds.to_config();
    feeds.validate()?;

    Ok(InstallRequest::new(
        install_dir,
        platform,
        architecture,
        runtime,
        target.version.clone(),
    )
    .with_feeds(feeds))
}
