// Retry-round / fallback orchestration with rate-limit cooldowns

use std::path::Path;
use std::sync::Arc;

use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

use super::errors::DownloadError;
use super::exec::CommandRunner;
use super::models::DownloadConfig;
use super::strategies;

pub struct Orchestrator {
    runner: Arc<dyn CommandRunner>,
    config: DownloadConfig,
}

impl Orchestrator {
    pub fn new(runner: Arc<dyn CommandRunner>, config: DownloadConfig) -> Self {
        Self { runner, config }
    }

    /// Try every strategy across every retry round until one invocation
    /// exits zero.
    ///
    /// `Err` means the entry is reported as failed and the run moves on;
    /// it is never fatal to the run. The first success short-circuits:
    /// later strategies in the same round are never reached.
    pub async fn attempt_download(
        &self,
        url: &str,
        dest_dir: &Path,
        index: usize,
    ) -> Result<(), DownloadError> {
        std::fs::create_dir_all(dest_dir)
            .map_err(|e| DownloadError::Io(format!("Failed to create {}: {}", dest_dir.display(), e)))?;

        let template = strategies::output_template(dest_dir, index);
        let strategy_list = strategies::strategies();
        let mut attempts: u32 = 0;

        for round in 0..=self.config.max_retry_rounds {
            for (strategy_idx, strategy) in strategy_list.iter().enumerate() {
                // Escalating backoff tied to the round, skipped only for
                // the very first attempt overall.
                if round > 0 || strategy_idx > 0 {
                    let delay = self.config.backoff_base_secs * (round as u64 + 1);
                    debug!(delay_secs = delay, "waiting before next attempt");
                    sleep(Duration::from_secs(delay)).await;
                }

                attempts += 1;
                info!(
                    index,
                    round = round + 1,
                    strategy = strategy.label,
                    "attempting download"
                );

                let args = strategy.args(url, &template);
                let result = self
                    .runner
                    .run(&self.config.ytdlp_bin, &args, self.config.download_timeout_secs)
                    .await;

                match result {
                    Ok(output) if output.status.success() => {
                        info!(index, strategy = strategy.label, "download succeeded");
                        if strategy_idx == 0 {
                            self.fetch_secondary_subtitles(url, dest_dir, index).await;
                        }
                        return Ok(());
                    }
                    Ok(output) => {
                        let stderr = String::from_utf8_lossy(&output.stderr);
                        let err = DownloadError::from_output(output.status.code(), &stderr);
                        warn!(strategy = strategy.label, %err, "strategy failed");
                        if err.is_rate_limited() {
                            info!(
                                cooldown_secs = self.config.rate_limit_cooldown_secs,
                                "rate limited, cooling down"
                            );
                            sleep(Duration::from_secs(self.config.rate_limit_cooldown_secs)).await;
                        }
                    }
                    Err(err) => {
                        // Timeout, missing tool, pipe faults: all
                        // recoverable, move to the next strategy.
                        warn!(strategy = strategy.label, %err, "invocation fault");
                    }
                }
            }
        }

        Err(DownloadError::Exhausted { attempts })
    }

    /// Best-effort Arabic subtitle sidecar, only after the richest
    /// strategy succeeded. Every failure here is logged and swallowed.
    async fn fetch_secondary_subtitles(&self, url: &str, dest_dir: &Path, index: usize) {
        let title = match self.query_sanitized_title(url).await {
            Ok(title) if !title.is_empty() => title,
            Ok(_) => {
                warn!(index, "subtitle fetch skipped: empty title");
                return;
            }
            Err(err) => {
                warn!(index, %err, "subtitle fetch skipped: title query failed");
                return;
            }
        };

        let template = dest_dir
            .join(format!("{:02} - {}.%(ext)s", index, title))
            .to_string_lossy()
            .into_owned();
        let args = strategies::subtitle_only_args(url, &template, "ar");

        match self
            .runner
            .run(&self.config.ytdlp_bin, &args, self.config.subtitle_timeout_secs)
            .await
        {
            Ok(output) if output.status.success() => {
                info!(index, "secondary subtitles fetched");
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                warn!(
                    index,
                    err = %DownloadError::from_output(output.status.code(), &stderr),
                    "secondary subtitle fetch failed"
                );
            }
            Err(err) => {
                warn!(index, %err, "secondary subtitle fetch failed");
            }
        }
    }

    /// Ask yt-dlp for the sanitized title it would have used in the
    /// output filename.
    async fn query_sanitized_title(&self, url: &str) -> Result<String, DownloadError> {
        let args = strategies::title_query_args(url);
        let output = self
            .runner
            .run(&self.config.ytdlp_bin, &args, self.config.title_timeout_secs)
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DownloadError::from_output(output.status.code(), &stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .trim()
            .replace('\n', ""))
    }
}
