use crate::types::{DownloadError, DownloadJob, ToolExit};
use async_trait::async_trait;
use tokio::process::Command;

/// Program run when none is configured
pub const DEFAULT_PROGRAM: &str = "youtube-dl";

#[async_trait]
pub trait Downloader {
    /// Check that the download tool can be run
    async fn check_available(&self) -> Result<(), DownloadError>;

    /// Run the tool for one job and wait for it to exit
    async fn download(&self, job: &DownloadJob) -> Result<ToolExit, DownloadError>;

    /// Program name, used in log output
    fn program(&self) -> &str;
}

/// youtube-dl compatible command-line tool (youtube-dl, yt-dlp, ...)
#[derive(Debug, Clone)]
pub struct YoutubeDl {
    program: String,
}

impl YoutubeDl {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for YoutubeDl {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

#[async_trait]
impl Downloader for YoutubeDl {
    async fn check_available(&self) -> Result<(), DownloadError> {
        which::which(&self.program)
            .map(|path| tracing::debug!(path = %path.display(), "found download tool"))
            .map_err(|_| DownloadError::ToolNotFound(self.program.clone()))
    }

    async fn download(&self, job: &DownloadJob) -> Result<ToolExit, DownloadError> {
        // stdio is inherited so the tool's progress output reaches the terminal
        let status = Command::new(&self.program)
            .args(job.args())
            .current_dir(job.target_dir())
            .status()
            .await
            .map_err(|e| DownloadError::spawn(&self.program, e))?;

        Ok(ToolExit::from(status))
    }

    fn program(&self) -> &str {
        &self.program
    }
}
