//! Download progress bar.

use indicatif::{ProgressBar, ProgressStyle};
use sharedrt_runtime::DownloadProgressCallback;

const BAR_TEMPLATE: &str = concat!(
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] ",
    "{bytes}/{total_bytes} ({bytes_per_sec})"
);

/// A terminal progress bar fed by the downloader.
///
/// Clones share the same bar, so one clone can go to the downloader and
/// another to the log sink.
#[derive(Clone)]
pub struct DownloadProgress {
    bar: ProgressBar,
}

impl Default for DownloadProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl DownloadProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(download_style());
        Self { bar }
    }

    /// A bar that tracks progress but never draws.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Callback to hand to `HttpDownloader::with_progress`.
    pub fn callback(&self) -> DownloadProgressCallback {
        let bar = self.bar.clone();
        Box::new(move |downloaded, total| {
            if total > 0 && bar.length() != Some(total) {
                bar.set_length(total);
            }
            bar.set_position(downloaded);
        })
    }

    /// Print a line above the bar.
    pub fn println(&self, line: &str) {
        self.bar.suspend(|| println!("{line}"));
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

fn download_style() -> ProgressStyle {
    ProgressStyle::with_template(BAR_TEMPLATE)
        .map_or_else(|_| ProgressStyle::default_bar(), |style| style.progress_chars("█▓░"))
}
