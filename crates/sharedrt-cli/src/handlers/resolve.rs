//! `sharedrt resolve`

use std::path::Path;

use sharedrt_core::{AssetDescriptor, DistributionResolver, build_download_url};
use sharedrt_runtime::{HttpDownloader, HttpDownloaderConfig, LocalFileSystem};

use super::build_request;
use crate::commands::ResolveArgs;
use crate::parser::FeedArgs;

/// Print the concrete version, commit and archive URL for a request.
pub async fn execute(args: &ResolveArgs, feeds: &FeedArgs) -> anyhow::Result<()> {
    let request = build_request(&args.target, Path::new("."), feeds)?;
    let asset = AssetDescriptor::resolve(request.runtime, request.platform)?;

    let downloader = HttpDownloader::new(&HttpDownloaderConfig::new())?;
    let fs = LocalFileSystem::new();
    let resolved = DistributionResolver::new(&downloader, &fs)
        .resolve_version(&request, &asset)
        .await?;

    let url = build_download_url(&request, &asset, &request.feeds.cached_feed, &resolved.version);

    println!("{} {}", asset.name, resolved.version);
    if let Some(commit) = resolved.commit {
        println!("commit: {commit}");
    }
    println!("url:    {url}");
    Ok(())
}
