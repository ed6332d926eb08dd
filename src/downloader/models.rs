// Common data models for the archiving run

use std::path::PathBuf;

use serde::Serialize;

use super::tools;

/// Tunable knobs for one archiving run. Tests shrink the retry count
/// through the builders; everything else keeps the defaults.
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// Root of the output tree; one subdirectory per catalog category
    pub root_dir: PathBuf,
    /// Resolved yt-dlp binary
    pub ytdlp_bin: String,
    /// Extra full passes over the strategy list after the first one
    pub max_retry_rounds: u32,
    /// Bounded wait for one download invocation
    pub download_timeout_secs: u64,
    /// Bounded wait for the title query
    pub title_timeout_secs: u64,
    /// Bounded wait for the subtitle-only invocation
    pub subtitle_timeout_secs: u64,
    /// Base backoff; the sleep before an attempt is base * (round + 1)
    pub backoff_base_secs: u64,
    /// Extra cooldown after a rate-limited attempt
    pub rate_limit_cooldown_secs: u64,
    /// Pause between catalog entries
    pub inter_video_delay_secs: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        let root_dir = std::env::var_os("ARCHIVE_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::download_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("attention_videos")
            });

        Self {
            root_dir,
            ytdlp_bin: tools::find_ytdlp(),
            max_retry_rounds: 2,
            download_timeout_secs: 300,
            title_timeout_secs: 30,
            subtitle_timeout_secs: 60,
            backoff_base_secs: 5,
            rate_limit_cooldown_secs: 30,
            inter_video_delay_secs: 10,
        }
    }
}

impl DownloadConfig {
    pub fn with_root_dir(mut self, dir: PathBuf) -> Self {
        self.root_dir = dir;
        self
    }

    pub fn with_ytdlp_bin(mut self, bin: impl Into<String>) -> Self {
        self.ytdlp_bin = bin.into();
        self
    }

    pub fn with_max_retry_rounds(mut self, rounds: u32) -> Self {
        self.max_retry_rounds = rounds;
        self
    }
}

/// One catalog entry that exhausted every strategy in every round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedDownload {
    pub index: usize,
    pub title: String,
    pub url: String,
    pub category: String,
}

/// Aggregate result of one archiving run, consumed by the final report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub successful: u32,
    pub failed: Vec<FailedDownload>,
}

impl RunSummary {
    pub fn record_success(&mut self) {
        self.successful += 1;
    }

    pub fn record_failure(&mut self, failure: FailedDownload) {
        self.failed.push(failure);
    }
}
