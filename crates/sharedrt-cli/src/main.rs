//! CLI entry point - the composition root.
//!
//! Install failures are printed with their full cause chain and do not
//! change the exit status.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sharedrt_cli::{Cli, Commands, handlers};

#[tokio::main]
async fn main() {
    // Load .env before parsing so it can feed clap's `env` defaults
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Install(args) => handlers::install::execute(args, &cli.feeds).await,
        Commands::Resolve(args) => handlers::resolve::execute(args, &cli.feeds).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
    }
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
