//! `sharedrt install`

use std::sync::Arc;

use sharedrt_core::{InstallOutcome, StandaloneInstaller};
use sharedrt_runtime::{ArchiveExtractor, HttpDownloader, HttpDownloaderConfig, LocalFileSystem};
use tracing::debug;

use super::build_request;
use crate::commands::InstallArgs;
use crate::parser::FeedArgs;
use crate::presentation::DownloadProgress;

/// Install the requested runtime.
pub async fn execute(args: &InstallArgs, feeds: &FeedArgs) -> anyhow::Result<()> {
    let progress = if args.quiet {
        DownloadProgress::hidden()
    } else {
        DownloadProgress::new()
    };

    let mut request = build_request(&args.target, &args.install_dir, feeds)?.with_force(args.force);
    if !args.quiet {
        let sink = progress.clone();
        request = request.with_log_sink(move |line| sink.println(line));
    }

    let downloader =
        HttpDownloader::new(&HttpDownloaderConfig::new())?.with_progress(progress.callback());
    let installer = StandaloneInstaller::new(
        Arc::new(downloader),
        Arc::new(ArchiveExtractor::new()),
        Arc::new(LocalFileSystem::new()),
    );

    let result = installer.install(&request).await;
    progress.finish();

    match result? {
        InstallOutcome::AlreadyInstalled { path } => {
            debug!(path = %path.display(), "Nothing to do");
        }
        InstallOutcome::Installed { version, path } => {
            debug!(%version, path = %path.display(), "Install finished");
        }
    }
    Ok(())
}
