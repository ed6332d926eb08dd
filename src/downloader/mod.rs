// Download orchestration around the external yt-dlp tool

pub mod errors;
pub mod exec;
pub mod info;
pub mod models;
pub mod orchestrator;
pub mod runner;
pub mod strategies;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

pub use errors::DownloadError;
pub use exec::{CommandRunner, SystemRunner};
pub use models::{DownloadConfig, FailedDownload, RunSummary};
pub use orchestrator::Orchestrator;
pub use runner::RunDriver;
