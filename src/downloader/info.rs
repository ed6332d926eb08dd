// Preflight metadata probe via --dump-json

use serde::Serialize;

use super::errors::DownloadError;
use super::exec::CommandRunner;
use super::strategies;

/// Minimal metadata logged before a download starts.
#[derive(Debug, Clone, Serialize)]
pub struct VideoInfo {
    pub title: String,
    pub uploader: String,
    /// "m:ss"
    pub duration: String,
}

/// Best-effort metadata lookup. Callers log failures and proceed; the
/// probe never gates the download itself.
pub async fn probe_video_info(
    runner: &dyn CommandRunner,
    binary: &str,
    url: &str,
    timeout_secs: u64,
) -> Result<VideoInfo, DownloadError> {
    let args = strategies::dump_json_args(url);
    let output = runner.run(binary, &args, timeout_secs).await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DownloadError::from_output(output.status.code(), &stderr));
    }

    parse_video_info(&output.stdout)
}

fn parse_video_info(stdout: &[u8]) -> Result<VideoInfo, DownloadError> {
    let json_str = String::from_utf8_lossy(stdout);
    let json: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|e| DownloadError::ParseError(format!("Failed to parse JSON: {}", e)))?;

    let duration_secs = json["duration"].as_f64().unwrap_or(0.0) as i64;
    let minutes = duration_secs / 60;
    let seconds = duration_secs % 60;

    Ok(VideoInfo {
        title: json["title"].as_str().unwrap_or("Unknown").to_string(),
        uploader: json["uploader"].as_str().unwrap_or("Unknown").to_string(),
        duration: format!("{}:{:02}", minutes, seconds),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_video_info() {
        let json = br#"{"title": "Attention in Transformers", "uploader": "someone", "duration": 754.2}"#;
        let info = parse_video_info(json).unwrap();
        assert_eq!(info.title, "Attention in Transformers");
        assert_eq!(info.uploader, "someone");
        assert_eq!(info.duration, "12:34");
    }

    #[test]
    fn test_parse_video_info_defaults_missing_fields() {
        let info = parse_video_info(b"{}").unwrap();
        assert_eq!(info.title, "Unknown");
        assert_eq!(info.uploader, "Unknown");
        assert_eq!(info.duration, "0:00");
    }

    #[test]
    fn test_parse_video_info_rejects_garbage() {
        let err = parse_video_info(b"not json").unwrap_err();
        assert!(matches!(err, DownloadError::ParseError(_)));
    }
}
