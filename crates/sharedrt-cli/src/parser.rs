//! Main CLI parser and global options.

use clap::{Args, Parser};
use sharedrt_core::{DEFAULT_CACHED_FEED, DEFAULT_UNCACHED_FEED, FeedConfig};

use crate::commands::Commands;

/// Command-line interface for installing shared runtimes.
#[derive(Parser, Debug)]
#[command(name = "sharedrt")]
#[command(about = "Install standalone .NET shared runtimes")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub feeds: FeedArgs,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Feed overrides, shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct FeedArgs {
    /// Feed serving runtime archives
    #[arg(
        long = "cached-feed",
        env = "SHAREDRT_CACHED_FEED",
        default_value = DEFAULT_CACHED_FEED,
        global = true
    )]
    pub cached_feed: String,

    /// Feed serving latest.version pointers
    #[arg(
        long = "uncached-feed",
        env = "SHAREDRT_UNCACHED_FEED",
        default_value = DEFAULT_UNCACHED_FEED,
        global = true
    )]
    pub uncached_feed: String,
}

impl FeedArgs {
    pub fn to_config(&self) -> FeedConfig {
        FeedConfig::new()
            .with_cached_feed(&self.cached_feed)
            .with_uncached_feed(&self.uncached_feed)
    }
}
