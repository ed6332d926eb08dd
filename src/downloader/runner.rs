// Run driver: walks the catalog sequentially and aggregates the summary

use std::sync::Arc;

use time::format_description::well_known::Rfc2822;
use time::OffsetDateTime;
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

use crate::catalog::{self, IndexedEntry};

use super::exec::CommandRunner;
use super::info;
use super::models::{DownloadConfig, FailedDownload, RunSummary};
use super::orchestrator::Orchestrator;

pub struct RunDriver {
    runner: Arc<dyn CommandRunner>,
    orchestrator: Orchestrator,
    config: DownloadConfig,
}

impl RunDriver {
    pub fn new(runner: Arc<dyn CommandRunner>, config: DownloadConfig) -> Self {
        let orchestrator = Orchestrator::new(Arc::clone(&runner), config.clone());
        Self {
            runner,
            orchestrator,
            config,
        }
    }

    /// Download every entry in order and return the run summary. One
    /// video, one strategy, one subprocess at a time; a fixed pause
    /// between entries keeps the request rate down.
    pub async fn run(&self, entries: &[IndexedEntry]) -> RunSummary {
        let mut summary = RunSummary::default();
        let mut current_category = "";

        for (position, item) in entries.iter().enumerate() {
            if item.category != current_category {
                current_category = item.category;
                info!(category = %catalog::display_name(item.category), "entering category");
            }
            info!(index = item.index, title = item.entry.title, url = item.entry.url, "processing entry");

            match info::probe_video_info(
                self.runner.as_ref(),
                &self.config.ytdlp_bin,
                item.entry.url,
                self.config.title_timeout_secs,
            )
            .await
            {
                Ok(meta) => info!(
                    title = %meta.title,
                    uploader = %meta.uploader,
                    duration = %meta.duration,
                    "resolved metadata"
                ),
                Err(err) => debug!(%err, "metadata probe failed, downloading anyway"),
            }

            let dest_dir = self.config.root_dir.join(item.category);
            match self
                .orchestrator
                .attempt_download(item.entry.url, &dest_dir, item.index)
                .await
            {
                Ok(()) => summary.record_success(),
                Err(err) => {
                    warn!(index = item.index, %err, "giving up on entry");
                    summary.record_failure(FailedDownload {
                        index: item.index,
                        title: item.entry.title.to_string(),
                        url: item.entry.url.to_string(),
                        category: item.category.to_string(),
                    });
                }
            }

            if position + 1 < entries.len() {
                debug!(
                    delay_secs = self.config.inter_video_delay_secs,
                    "pausing before next video"
                );
                sleep(Duration::from_secs(self.config.inter_video_delay_secs)).await;
            }
        }

        summary
    }
}

/// Final human-readable report. Deliberately plain stdout rather than
/// log output: this is the product of the run.
pub fn print_summary(summary: &RunSummary, config: &DownloadConfig) {
    let divider = "=".repeat(60);
    println!("\n{divider}");
    println!("DOWNLOAD SUMMARY");
    println!("{divider}");
    if let Ok(stamp) = OffsetDateTime::now_utc().format(&Rfc2822) {
        println!("Finished: {stamp}");
    }
    println!("Successful downloads: {}", summary.successful);
    println!("Failed downloads: {}", summary.failed.len());

    if !summary.failed.is_empty() {
        println!("\nFailed videos:");
        for failed in &summary.failed {
            println!("  {:02}. {}", failed.index, failed.title);
            println!("      Category: {}", failed.category);
            println!("      URL: {}", failed.url);
        }
    }

    println!("\nAll videos are saved in: {}", config.root_dir.display());
    println!("Videos include English subtitles embedded where available;");
    println!("Arabic subtitles were attempted separately.");
    println!("{divider}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use crate::downloader::testing::{ScriptedOutcome, ScriptedRunner};

    fn two_entry_catalog() -> Vec<IndexedEntry> {
        vec![
            IndexedEntry {
                index: 1,
                category: "self_attention",
                entry: CatalogEntry {
                    title: "Attention in Transformers",
                    url: "https://example.com/one",
                },
            },
            IndexedEntry {
                index: 2,
                category: "self_attention",
                entry: CatalogEntry {
                    title: "Attention, Again",
                    url: "https://example.com/two",
                },
            },
        ]
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_summary() {
        // Entry 1: probe fails (ignored), first strategy succeeds, title
        // query fails so the subtitle side-fetch is skipped. Entry 2:
        // probe fails, then every strategy in every round fails.
        let runner = ScriptedRunner::new(vec![
            ScriptedOutcome::fail("ERROR: probe refused"),
            ScriptedOutcome::ok(),
            ScriptedOutcome::fail("ERROR: no title"),
        ]);
        let dir = tempfile::tempdir().unwrap();
        let config = DownloadConfig::default()
            .with_root_dir(dir.path().to_path_buf())
            .with_ytdlp_bin("yt-dlp-test")
            .with_max_retry_rounds(2);

        let driver = RunDriver::new(Arc::new(runner.clone()), config);
        let summary = driver.run(&two_entry_catalog()).await;

        assert_eq!(summary.successful, 1);
        assert_eq!(summary.failed.len(), 1);
        let failed = &summary.failed[0];
        assert_eq!(failed.index, 2);
        assert_eq!(failed.title, "Attention, Again");
        assert_eq!(failed.url, "https://example.com/two");
        assert_eq!(failed.category, "self_attention");

        // 3 scripted + 1 probe + 9 exhausted attempts for entry 2
        assert_eq!(runner.invocation_count(), 13);
        assert!(dir.path().join("self_attention").is_dir());
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_failures_never_abort_the_run() {
        let runner = ScriptedRunner::new(vec![]);
        let dir = tempfile::tempdir().unwrap();
        let config = DownloadConfig::default()
            .with_root_dir(dir.path().to_path_buf())
            .with_ytdlp_bin("yt-dlp-test")
            .with_max_retry_rounds(0);

        let driver = RunDriver::new(Arc::new(runner.clone()), config);
        let summary = driver.run(&two_entry_catalog()).await;

        assert_eq!(summary.successful, 0);
        let indices: Vec<usize> = summary.failed.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_destination_paths_follow_category_layout() {
        let runner = ScriptedRunner::new(vec![
            ScriptedOutcome::fail("ERROR: probe refused"),
            ScriptedOutcome::ok(),
            ScriptedOutcome::fail("ERROR: no title"),
        ]);
        let dir = tempfile::tempdir().unwrap();
        let config = DownloadConfig::default()
            .with_root_dir(dir.path().to_path_buf())
            .with_ytdlp_bin("yt-dlp-test")
            .with_max_retry_rounds(0);

        let driver = RunDriver::new(Arc::new(runner.clone()), config);
        driver.run(&two_entry_catalog()[..1]).await;

        let download = &runner.invocations()[1];
        let template_pos = download.args.iter().position(|a| a == "-o").unwrap();
        let template = &download.args[template_pos + 1];
        assert!(template.ends_with("self_attention/01 - %(title)s.%(ext)s"));
    }
}
