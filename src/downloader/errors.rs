// Error types for yt-dlp orchestration

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Throttling signature in yt-dlp stderr. The exact phrasing varies
    /// between extractor versions, so match the whole 429 family.
    static ref RATE_LIMIT_RE: Regex =
        Regex::new(r"(?i)HTTP Error 429|Too Many Requests|rate.?limit").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadError {
    /// Invocation exceeded its bounded wait and was killed
    Timeout { seconds: u64 },

    /// The remote service is throttling us (HTTP 429 family)
    RateLimited(String),

    /// yt-dlp binary missing or not runnable
    ToolNotFound(String),

    /// Failed to parse yt-dlp output
    ParseError(String),

    /// Non-zero exit without a recognized signature
    ExecutionFailed { code: Option<i32>, stderr: String },

    /// Spawn/wait/pipe-level fault around the subprocess
    Io(String),

    /// Every strategy in every retry round failed for one video
    Exhausted { attempts: u32 },
}

impl DownloadError {
    /// Classify a failed invocation from its exit code and captured stderr.
    pub fn from_output(code: Option<i32>, stderr: &str) -> Self {
        if RATE_LIMIT_RE.is_match(stderr) {
            return Self::RateLimited(first_error_line(stderr));
        }
        Self::ExecutionFailed {
            code,
            stderr: stderr.to_string(),
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited(_))
    }
}

/// First `ERROR:` line from captured stderr, falling back to the last
/// non-empty line. yt-dlp interleaves warnings freely and the tail is
/// usually the actionable part.
pub fn first_error_line(stderr: &str) -> String {
    stderr
        .lines()
        .find(|line| line.trim_start().starts_with("ERROR:"))
        .or_else(|| stderr.lines().rev().find(|line| !line.trim().is_empty()))
        .unwrap_or("")
        .trim()
        .to_string()
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout { seconds } => write!(f, "Timed out after {}s", seconds),
            Self::RateLimited(detail) => write!(f, "Rate limited by remote service: {}", detail),
            Self::ToolNotFound(tool) => write!(f, "Tool not found: {}", tool),
            Self::ParseError(msg) => write!(f, "Parse error: {}", msg),
            Self::ExecutionFailed { code: Some(code), stderr } => {
                write!(f, "yt-dlp exited with code {}: {}", code, first_error_line(stderr))
            }
            Self::ExecutionFailed { code: None, stderr } => {
                write!(f, "yt-dlp terminated abnormally: {}", first_error_line(stderr))
            }
            Self::Io(msg) => write!(f, "Execution error: {}", msg),
            Self::Exhausted { attempts } => {
                write!(f, "All {} download attempts failed", attempts)
            }
        }
    }
}

impl std::error::Error for DownloadError {}
