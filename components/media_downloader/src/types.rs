use download_options::{into_tokens, Argument, Config};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Required download tool not found on PATH: {0}")]
    ToolNotFound(String),

    #[error("Failed to create target directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to launch {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DownloadError::CreateDir {
            path: path.into(),
            source,
        }
    }

    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        DownloadError::Spawn {
            program: program.into(),
            source,
        }
    }
}

/// Whether planned downloads are actually executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Log what would be downloaded without touching the filesystem
    DryRun,
    /// Create directories and run the download tool
    #[default]
    Apply,
}

/// The three kinds of sources a configuration can list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Videos,
    Playlists,
    Channels,
}

impl BatchKind {
    /// Processing order of a sweep
    pub const ALL: [BatchKind; 3] = [BatchKind::Videos, BatchKind::Playlists, BatchKind::Channels];

    /// Name of the directory under the output root
    pub fn label(self) -> &'static str {
        match self {
            BatchKind::Videos => "videos",
            BatchKind::Playlists => "playlists",
            BatchKind::Channels => "channels",
        }
    }

    /// Output template configured for this kind
    pub fn format(self, config: &Config) -> Option<&str> {
        match self {
            BatchKind::Videos => config.video_format.as_deref(),
            BatchKind::Playlists => config.playlist_format.as_deref(),
            BatchKind::Channels => config.channel_format.as_deref(),
        }
    }

    /// `(name, url)` pairs of this kind. Videos have no name.
    pub fn items(self, config: &Config) -> Vec<(Option<&str>, &str)> {
        match self {
            BatchKind::Videos => config
                .videos
                .iter()
                .flatten()
                .map(|url| (None, url.as_str()))
                .collect(),
            BatchKind::Playlists => named_items(config.playlists.as_ref()),
            BatchKind::Channels => named_items(config.channels.as_ref()),
        }
    }
}

fn named_items(map: Option<&BTreeMap<String, String>>) -> Vec<(Option<&str>, &str)> {
    map.into_iter()
        .flatten()
        .map(|(name, url)| (Some(name.as_str()), url.as_str()))
        .collect()
}

impl fmt::Display for BatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One planned invocation of the download tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadJob {
    pub kind: BatchKind,
    pub name: Option<String>,
    pub url: String,
    /// Working directory of the tool
    pub target_dir: PathBuf,
    pub arguments: Vec<Argument>,
}

impl DownloadJob {
    /// Tool arguments: the source URL followed by the compiled options
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![self.url.clone()];
        args.extend(into_tokens(self.arguments.iter().cloned()));
        args
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }
}

impl fmt::Display for DownloadJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)?;
        for argument in &self.arguments {
            write!(f, " \\\n    {argument}")?;
        }
        Ok(())
    }
}

/// How the download tool finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolExit {
    Success,
    /// Non-zero exit; `None` when terminated by a signal
    Failed(Option<i32>),
}

impl From<std::process::ExitStatus> for ToolExit {
    fn from(status: std::process::ExitStatus) -> Self {
        if status.success() {
            ToolExit::Success
        } else {
            ToolExit::Failed(status.code())
        }
    }
}

/// Tally of a sweep, logged when it completes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub planned: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl fmt::Display for SweepSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} planned, {} succeeded, {} failed, {} skipped",
            self.planned, self.succeeded, self.failed, self.skipped
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_args_start_with_url() {
        let job = DownloadJob {
            kind: BatchKind::Videos,
            name: None,
            url: "http://a".to_string(),
            target_dir: PathBuf::from("/out/videos"),
            arguments: vec![
                Argument::new("retries", Some("3")),
                Argument::new("o", Some("%(title)s.%(ext)s")),
            ],
        };
        assert_eq!(job.args(), vec!["http://a", "--retries=3", "-o", "%(title)s.%(ext)s"]);
        assert_eq!(
            job.to_string(),
            "http://a \\\n    --retries=3 \\\n    -o %(title)s.%(ext)s"
        );
    }

    #[test]
    fn items_of_missing_collections_are_empty() {
        let config = Config::from_yaml("sevro: v1\n").unwrap();
        for kind in BatchKind::ALL {
            assert!(kind.items(&config).is_empty(), "{kind} should be empty");
        }
    }

    #[test]
    fn named_items_are_sorted_by_name() {
        let config = Config::from_yaml(
            "sevro: v1\nchannels:\n  b: http://b\n  a: http://a\nvideos: [x, y]\n",
        )
        .unwrap();
        assert_eq!(
            BatchKind::Channels.items(&config),
            vec![(Some("a"), "http://a"), (Some("b"), "http://b")]
        );
        assert_eq!(BatchKind::Videos.items(&config), vec![(None, "x"), (None, "y")]);
    }
}
