#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the binary target only
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod commands;
pub mod handlers;
pub mod host;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use commands::{Commands, InstallArgs, ResolveArgs, TargetArgs};
pub use parser::{Cli, FeedArgs};
