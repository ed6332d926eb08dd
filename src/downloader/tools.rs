// yt-dlp binary discovery

use std::process::Command;

/// Locate the yt-dlp binary.
///
/// Resolution order: `YTDLP_BIN` environment override, common install
/// paths, `which`, then the bare name and hope it's in PATH.
pub fn find_ytdlp() -> String {
    if let Ok(bin) = std::env::var("YTDLP_BIN") {
        if !bin.is_empty() {
            return bin;
        }
    }

    let common_paths = [
        "/opt/homebrew/bin/yt-dlp", // Homebrew on Apple Silicon
        "/usr/local/bin/yt-dlp",    // Homebrew on Intel Mac
        "/usr/bin/yt-dlp",          // System installation
    ];

    for path in common_paths {
        if std::path::Path::new(path).exists() {
            return path.to_string();
        }
    }

    if let Ok(output) = Command::new("which").arg("yt-dlp").output() {
        if output.status.success() {
            let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if !path.is_empty() {
                return path;
            }
        }
    }

    "yt-dlp".to_string()
}

/// Probe the tool version for the startup log. `None` when unavailable.
pub fn probe_version(binary: &str) -> Option<String> {
    match Command::new(binary).arg("--version").output() {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
        }
        _ => None,
    }
}
