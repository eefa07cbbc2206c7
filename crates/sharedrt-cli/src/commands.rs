//! Subcommand definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install a shared runtime into a runtime directory
    Install(InstallArgs),
    /// Print the concrete version and archive URL a request resolves to
    Resolve(ResolveArgs),
}

/// Which runtime to fetch, and for which target.
///
/// Values stay strings here so that unsupported names are reported by the
/// installer like any other install error.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// `major.minor` for the latest patch of a channel, or `major.minor.patch`
    pub version: String,

    /// Runtime to install (dotnet, aspnetcore)
    #[arg(short = 'r', long, default_value = "dotnet")]
    pub runtime: String,

    /// Target platform (win, linux, osx); defaults to the host
    #[arg(long)]
    pub platform: Option<String>,

    /// Target architecture (x64, x86); defaults to the host
    #[arg(long = "arch")]
    pub architecture: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct InstallArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Runtime installation root (the directory holding `shared/`)
    #[arg(
        short = 'd',
        long = "install-dir",
        env = "SHAREDRT_INSTALL_DIR",
        default_value = "."
    )]
    pub install_dir: PathBuf,

    /// Reinstall even if a matching version is already present
    #[arg(short, long)]
    pub force: bool,

    /// Suppress progress lines and the download bar
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}
