use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration document: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("unsupported sevro version '{found}', expected '{expected}'")]
    UnsupportedVersion {
        found: String,
        expected: &'static str,
    },

    #[error("youtube_dl_options entry {index} has an empty flag name")]
    EmptyFlag { index: usize },

    #[error("youtube_dl_options entry {index} must hold exactly one key-value pair, found {count}")]
    NotSinglePair { index: usize, count: usize },

    #[error("youtube_dl_options entry {index} must be a flag name or a single-pair mapping")]
    InvalidEntry { index: usize },

    #[error("youtube_dl_options entry {index}: value for '{flag}' must be a scalar")]
    NonScalarValue { index: usize, flag: String },
}

impl ConfigError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Read {
            path: path.into(),
            source,
        }
    }
}
