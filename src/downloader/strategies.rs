// Fixed fallback strategies for yt-dlp invocations

use std::path::Path;

/// Subtitle handling for one strategy.
#[derive(Debug, Clone)]
struct SubtitleOptions {
    langs: &'static str,
    /// Also accept auto-generated tracks
    auto_generated: bool,
    convert_to: &'static str,
    /// Embed into the container and drop the standalone file
    embed: bool,
}

/// One complete parameter set for a yt-dlp invocation.
///
/// Strategies are tried in declared order, highest quality first. Each
/// is self-sufficient: no partial progress is shared between them.
#[derive(Debug, Clone)]
pub struct DownloadStrategy {
    pub label: &'static str,
    format: &'static str,
    merge_format: Option<&'static str>,
    subtitles: Option<SubtitleOptions>,
    throttled_rate: Option<&'static str>,
    retries: Option<u32>,
    fragment_retries: Option<u32>,
    skip_unavailable_fragments: bool,
    extractor_retries: Option<u32>,
}

/// The fixed priority-ordered strategy list.
pub fn strategies() -> Vec<DownloadStrategy> {
    vec![
        // Highest quality with embedded English subtitles, throttled to
        // stay under the service's rate limiter.
        DownloadStrategy {
            label: "high-quality",
            format: "bestvideo[height<=1080]+bestaudio/best[height<=1080]",
            merge_format: Some("mp4"),
            subtitles: Some(SubtitleOptions {
                langs: "en",
                auto_generated: true,
                convert_to: "srt",
                embed: true,
            }),
            throttled_rate: Some("100K"),
            retries: Some(10),
            fragment_retries: Some(10),
            skip_unavailable_fragments: true,
            extractor_retries: Some(3),
        },
        // Simpler single-stream format, subtitles as sidecar files.
        DownloadStrategy {
            label: "simple-best",
            format: "best",
            merge_format: Some("mp4"),
            subtitles: Some(SubtitleOptions {
                langs: "en",
                auto_generated: false,
                convert_to: "srt",
                embed: false,
            }),
            throttled_rate: None,
            retries: Some(10),
            fragment_retries: None,
            skip_unavailable_fragments: false,
            extractor_retries: None,
        },
        // Last resort: plain mp4, no subtitles.
        DownloadStrategy {
            label: "minimal",
            format: "mp4",
            merge_format: None,
            subtitles: None,
            throttled_rate: None,
            retries: None,
            fragment_retries: None,
            skip_unavailable_fragments: false,
            extractor_retries: None,
        },
    ]
}

impl DownloadStrategy {
    /// Full argument list for one download attempt.
    pub fn args(&self, url: &str, output_template: &str) -> Vec<String> {
        let mut args: Vec<String> = vec![url.into(), "-f".into(), self.format.into()];

        if let Some(container) = self.merge_format {
            args.push("--merge-output-format".into());
            args.push(container.into());
        }

        if let Some(subs) = &self.subtitles {
            args.push("--write-subs".into());
            if subs.auto_generated {
                args.push("--write-auto-subs".into());
            }
            args.push("--sub-langs".into());
            args.push(subs.langs.into());
            args.push("--convert-subs".into());
            args.push(subs.convert_to.into());
            if subs.embed {
                args.push("--embed-subs".into());
                // Keep only the embedded track, not the sidecar file
                args.push("--no-write-subs".into());
            }
        }

        args.push("-o".into());
        args.push(output_template.into());
        args.push("--restrict-filenames".into());
        args.push("--no-playlist".into());

        if let Some(rate) = self.throttled_rate {
            args.push("--throttled-rate".into());
            args.push(rate.into());
        }
        if let Some(n) = self.retries {
            args.push("--retries".into());
            args.push(n.to_string());
        }
        if let Some(n) = self.fragment_retries {
            args.push("--fragment-retries".into());
            args.push(n.to_string());
        }
        if self.skip_unavailable_fragments {
            args.push("--skip-unavailable-fragments".into());
        }
        if let Some(n) = self.extractor_retries {
            args.push("--extractor-retries".into());
            args.push(n.to_string());
        }

        args
    }
}

/// Output template `<dest>/<NN> - %(title)s.%(ext)s`; the 2-digit index
/// keeps files sorted in catalog order.
pub fn output_template(dest_dir: &Path, index: usize) -> String {
    dest_dir
        .join(format!("{:02} - %(title)s.%(ext)s", index))
        .to_string_lossy()
        .into_owned()
}

/// Title-query invocation (no download): recovers the sanitized
/// filename stem yt-dlp would have used.
pub fn title_query_args(url: &str) -> Vec<String> {
    vec![
        url.into(),
        "--get-title".into(),
        "--restrict-filenames".into(),
        "--no-playlist".into(),
    ]
}

/// Subtitle-only invocation for a secondary language, paced to avoid
/// tripping the rate limiter.
pub fn subtitle_only_args(url: &str, output_template: &str, lang: &str) -> Vec<String> {
    vec![
        url.into(),
        "--skip-download".into(),
        "--write-subs".into(),
        "--write-auto-subs".into(),
        "--sub-langs".into(),
        lang.into(),
        "--convert-subs".into(),
        "srt".into(),
        "-o".into(),
        output_template.into(),
        "--restrict-filenames".into(),
        "--no-playlist".into(),
        "--sleep-requests".into(),
        "2".into(),
        "--sleep-interval".into(),
        "5".into(),
    ]
}

/// Metadata probe invocation (no download).
pub fn dump_json_args(url: &str) -> Vec<String> {
    vec![
        url.into(),
        "--dump-json".into(),
        "--no-playlist".into(),
        "--no-warnings".into(),
    ]
}
