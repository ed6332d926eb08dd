// Subprocess execution seam

use std::io;
use std::process::{Output, Stdio};

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

use super::errors::DownloadError;

/// Narrow interface over "run external command with args, bounded wait,
/// capture output" so orchestration logic can be exercised against
/// scripted exit codes and stderr without touching a real tool.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout_secs: u64,
    ) -> Result<Output, DownloadError>;
}

/// Production runner backed by tokio subprocesses. The child is killed
/// when the bounded wait elapses.
#[derive(Debug, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout_secs: u64,
    ) -> Result<Output, DownloadError> {
        let mut child = Command::new(program)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => DownloadError::ToolNotFound(program.to_string()),
                _ => DownloadError::Io(format!("Failed to start {}: {}", program, e)),
            })?;

        let mut stdout_pipe = child
            .stdout
            .take()
            .ok_or_else(|| DownloadError::Io(format!("Failed to capture stdout from {}", program)))?;
        let mut stderr_pipe = child
            .stderr
            .take()
            .ok_or_else(|| DownloadError::Io(format!("Failed to capture stderr from {}", program)))?;

        // Drain both pipes concurrently so a chatty child can't fill a
        // pipe buffer and deadlock against our wait().
        let stdout_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            stdout_pipe.read_to_end(&mut buf).await.map(|_| buf)
        });
        let stderr_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            stderr_pipe.read_to_end(&mut buf).await.map(|_| buf)
        });

        let waited = timeout(Duration::from_secs(timeout_secs), child.wait()).await;
        match waited {
            Ok(status_res) => {
                let status = status_res
                    .map_err(|e| DownloadError::Io(format!("Failed to wait for {}: {}", program, e)))?;
                let stdout = stdout_task
                    .await
                    .map_err(|e| DownloadError::Io(format!("stdout task failed: {}", e)))?
                    .map_err(|e| DownloadError::Io(format!("Failed to read stdout: {}", e)))?;
                let stderr = stderr_task
                    .await
                    .map_err(|e| DownloadError::Io(format!("stderr task failed: {}", e)))?
                    .map_err(|e| DownloadError::Io(format!("Failed to read stderr: {}", e)))?;
                Ok(Output {
                    status,
                    stdout,
                    stderr,
                })
            }
            Err(_) => {
                let _ = child.kill().await;
                stdout_task.abort();
                stderr_task.abort();
                Err(DownloadError::Timeout {
                    seconds: timeout_secs,
                })
            }
        }
    }
}
