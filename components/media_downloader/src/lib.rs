// components/media_downloader/src/lib.rs
mod types;
mod utils;
mod ytdlp;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use download_options::Config;

pub use types::{BatchKind, DownloadError, DownloadJob, ExecutionMode, SweepSummary, ToolExit};
pub use utils::{sanitize_dir_name, target_dir};
pub use ytdlp::{Downloader, YoutubeDl, DEFAULT_PROGRAM};

/// Runs one download per configured source, one after the other
pub struct BatchDownloader {
    output_root: PathBuf,
    mode: ExecutionMode,
    downloader: Arc<dyn Downloader + Send + Sync>,
}

impl BatchDownloader {
    /// Create a BatchDownloader that runs `program` for every source
    pub async fn new(
        output_root: impl AsRef<Path>,
        mode: ExecutionMode,
        program: impl Into<String>,
    ) -> Result<Self, DownloadError> {
        Self::new_with_downloader(output_root, mode, Arc::new(YoutubeDl::new(program))).await
    }

    /// Create a BatchDownloader with a specific downloader implementation
    ///
    /// The tool must be available unless running a dry run.
    pub async fn new_with_downloader(
        output_root: impl AsRef<Path>,
        mode: ExecutionMode,
        downloader: Arc<dyn Downloader + Send + Sync>,
    ) -> Result<Self, DownloadError> {
        if mode == ExecutionMode::Apply {
            downloader.check_available().await?;
        }

        Ok(Self {
            output_root: output_root.as_ref().to_owned(),
            mode,
            downloader,
        })
    }

    /// Every invocation a sweep over `config` makes, in order:
    /// videos, then playlists, then channels
    pub fn plan(&self, config: &Config) -> Vec<DownloadJob> {
        BatchKind::ALL
            .into_iter()
            .flat_map(|kind| self.plan_kind(config, kind))
            .collect()
    }

    fn plan_kind(&self, config: &Config, kind: BatchKind) -> Vec<DownloadJob> {
        let items = kind.items(config);
        if items.is_empty() {
            tracing::debug!(%kind, "nothing configured, skipping");
            return Vec::new();
        }

        let format = kind.format(config);
        items
            .into_iter()
            .map(|(name, url)| DownloadJob {
                kind,
                name: name.map(str::to_owned),
                url: url.to_owned(),
                target_dir: target_dir(&self.output_root, kind, name),
                arguments: config.cli_arguments(format),
            })
            .collect()
    }

    /// Download everything in `config`
    ///
    /// A failing item never stops the sweep: the error is logged and the
    /// next item is processed.
    pub async fn run(&self, config: &Config) -> SweepSummary {
        let mut summary = SweepSummary::default();

        for job in self.plan(config) {
            summary.planned += 1;

            if self.mode == ExecutionMode::DryRun {
                tracing::info!(
                    "[dry run] {} in {}:\n{} {}",
                    job.kind,
                    job.target_dir.display(),
                    self.downloader.program(),
                    job
                );
                continue;
            }

            match self.execute(&job).await {
                Ok(ToolExit::Success) => summary.succeeded += 1,
                Ok(ToolExit::Failed(code)) => {
                    tracing::warn!(url = %job.url, ?code, "download tool exited unsuccessfully");
                    summary.failed += 1;
                }
                Err(error @ DownloadError::CreateDir { .. }) => {
                    tracing::error!(url = %job.url, "skipping: {error}");
                    summary.skipped += 1;
                }
                Err(error) => {
                    tracing::error!(url = %job.url, "download failed: {error}");
                    summary.failed += 1;
                }
            }
        }

        summary
    }

    async fn execute(&self, job: &DownloadJob) -> Result<ToolExit, DownloadError> {
        tracing::info!("Downloading to {}", job.target_dir.display());
        tokio::fs::create_dir_all(&job.target_dir)
            .await
            .map_err(|e| DownloadError::create_dir(&job.target_dir, e))?;

        tracing::info!("{} {}", self.downloader.program(), job);
        self.downloader.download(job).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::TempDir;
    use ytdlp::stub::{DownloaderStub, StubOutcome};

    async fn downloader(
        root: &Path,
        mode: ExecutionMode,
        stub: DownloaderStub,
    ) -> (BatchDownloader, Arc<DownloaderStub>) {
        let stub = Arc::new(stub);
        let downloader = BatchDownloader::new_with_downloader(root, mode, stub.clone())
            .await
            .unwrap();
        (downloader, stub)
    }

    #[tokio::test]
    async fn test_unavailable_tool_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let stub = DownloaderStub {
            available: false,
            ..Default::default()
        };
        let mode = ExecutionMode::Apply;
        let result =
            BatchDownloader::new_with_downloader(temp_dir.path(), mode, Arc::new(stub)).await;
        assert_matches!(result.err(), Some(DownloadError::ToolNotFound(_)));
    }

    #[tokio::test]
    async fn test_dry_run_does_not_need_tool() {
        let temp_dir = TempDir::new().unwrap();
        let stub = DownloaderStub {
            available: false,
            ..Default::default()
        };
        let mode = ExecutionMode::DryRun;
        let result =
            BatchDownloader::new_with_downloader(temp_dir.path(), mode, Arc::new(stub)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_videos_share_directory_and_options() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::from_yaml(
            r#"
sevro: v1
youtube_dl_options:
  - retries: "3"
  - no-warnings
videos:
  - http://a
  - http://b
"#,
        )
        .unwrap();
        let (downloader, stub) =
            downloader(temp_dir.path(), ExecutionMode::Apply, DownloaderStub::new()).await;

        let summary = downloader.run(&config).await;

        let jobs = stub.jobs();
        assert_eq!(jobs.len(), 2);
        let videos_dir = temp_dir.path().join("videos");
        for (job, url) in jobs.iter().zip(["http://a", "http://b"]) {
            assert_eq!(job.target_dir, videos_dir);
            assert_eq!(job.args(), vec![url, "--retries=3", "--no-warnings"]);
        }
        assert!(videos_dir.is_dir());
        assert_eq!(
            summary,
            SweepSummary {
                planned: 2,
                succeeded: 2,
                ..Default::default()
            }
        );
    }

    #[tokio::test]
    async fn test_playlist_gets_own_directory_and_format() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::from_yaml(
            r#"
sevro: v1
playlist_format: "%(title)s.%(ext)s"
playlists:
  foo: http://x
"#,
        )
        .unwrap();
        let (downloader, stub) =
            downloader(temp_dir.path(), ExecutionMode::Apply, DownloaderStub::new()).await;

        downloader.run(&config).await;

        let jobs = stub.jobs();
        assert_eq!(jobs.len(), 1);
        let playlist_dir = temp_dir.path().join("playlists").join("foo");
        assert_eq!(jobs[0].target_dir, playlist_dir);
        assert_eq!(jobs[0].args(), vec!["http://x", "-o", "%(title)s.%(ext)s"]);
        assert!(playlist_dir.is_dir());
    }

    #[tokio::test]
    async fn test_empty_channels_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::from_yaml("sevro: v1\nchannels: {}\n").unwrap();
        let (downloader, stub) =
            downloader(temp_dir.path(), ExecutionMode::Apply, DownloaderStub::new()).await;

        let summary = downloader.run(&config).await;

        assert!(stub.jobs().is_empty());
        assert!(!temp_dir.path().join("channels").exists());
        assert_eq!(summary, SweepSummary::default());
    }

    #[tokio::test]
    async fn test_sweep_order_and_per_kind_format() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::from_yaml(
            r#"
sevro: v1
youtube_dl_options:
  - o: base.%(ext)s
channel_format: "%(uploader)s.%(ext)s"
channels:
  zeta: http://c/zeta
  alpha: http://c/alpha
playlists:
  mix: http://p/mix
videos:
  - http://v/1
"#,
        )
        .unwrap();
        let (downloader, _stub) =
            downloader(temp_dir.path(), ExecutionMode::Apply, DownloaderStub::new()).await;

        let plan = downloader.plan(&config);
        let urls: Vec<_> = plan.iter().map(|job| job.url.as_str()).collect();
        assert_eq!(urls, vec!["http://v/1", "http://p/mix", "http://c/alpha", "http://c/zeta"]);

        assert_eq!(plan[0].args(), vec!["http://v/1", "-o", "base.%(ext)s"]);
        assert_eq!(plan[1].args(), vec!["http://p/mix", "-o", "base.%(ext)s"]);
        assert_eq!(plan[2].args(), vec!["http://c/alpha", "-o", "%(uploader)s.%(ext)s"]);
        assert_eq!(plan[3].name.as_deref(), Some("zeta"));
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_sweep() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::from_yaml(
            "sevro: v1\nvideos:\n  - http://a\n  - http://b\n  - http://c\n",
        )
        .unwrap();
        let stub = DownloaderStub::new()
            .with_outcome("http://a", StubOutcome::Exit(ToolExit::Failed(Some(1))))
            .with_outcome("http://b", StubOutcome::SpawnError);
        let (downloader, stub) = downloader(temp_dir.path(), ExecutionMode::Apply, stub).await;

        let summary = downloader.run(&config).await;

        assert_eq!(stub.jobs().len(), 3);
        assert_eq!(
            summary,
            SweepSummary {
                planned: 3,
                succeeded: 1,
                failed: 2,
                skipped: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_unwritable_target_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the output root should be
        let root = temp_dir.path().join("not-a-dir");
        fs::write(&root, b"").unwrap();
        let config = Config::from_yaml(
            "sevro: v1\nvideos:\n  - http://a\nplaylists:\n  p: http://p\n",
        )
        .unwrap();
        let (downloader, stub) =
            downloader(&root, ExecutionMode::Apply, DownloaderStub::new()).await;

        let summary = downloader.run(&config).await;

        assert!(stub.jobs().is_empty());
        assert_eq!(
            summary,
            SweepSummary {
                planned: 2,
                skipped: 2,
                ..Default::default()
            }
        );
    }

    #[tokio::test]
    async fn test_dry_run_touches_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::from_yaml(
            "sevro: v1\nvideos:\n  - http://a\nchannels:\n  c: http://c\n",
        )
        .unwrap();
        let (downloader, stub) =
            downloader(temp_dir.path(), ExecutionMode::DryRun, DownloaderStub::new()).await;

        let summary = downloader.run(&config).await;

        assert!(stub.jobs().is_empty());
        assert!(!temp_dir.path().join("videos").exists());
        assert!(!temp_dir.path().join("channels").exists());
        assert_eq!(summary.planned, 2);
        assert_eq!(summary.succeeded + summary.failed + summary.skipped, 0);
    }
}
