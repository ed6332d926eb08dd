pub mod catalog;
pub mod downloader;

use std::sync::Arc;

use tracing::{info, warn};

use downloader::runner::{print_summary, RunDriver};
use downloader::{DownloadConfig, SystemRunner};

/// Execute a full archiving run over the built-in catalog.
///
/// Individual failures are collected into the summary; this function
/// (and the process) always finishes normally.
pub async fn run() {
    let config = DownloadConfig::default();

    match downloader::tools::probe_version(&config.ytdlp_bin) {
        Some(version) => info!(binary = %config.ytdlp_bin, %version, "yt-dlp available"),
        None => warn!(
            binary = %config.ytdlp_bin,
            "yt-dlp not found; every download will fail until it is installed"
        ),
    }

    if let Err(err) = std::fs::create_dir_all(&config.root_dir) {
        warn!(root = %config.root_dir.display(), %err, "could not create root directory");
    }

    let entries = catalog::indexed_entries();
    info!(
        videos = entries.len(),
        root = %config.root_dir.display(),
        "starting archive run"
    );

    let driver = RunDriver::new(Arc::new(SystemRunner), config.clone());
    let summary = driver.run(&entries).await;

    print_summary(&summary, &config);
}
