use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::compiler::{compile, Argument};
use crate::error::ConfigError;
use crate::merge::merge_format;
use crate::option::{DownloaderOption, RawOption};

/// The only configuration format version understood
pub const SEVRO_VERSION: &str = "v1";

/// Validated sevro configuration document
///
/// Every field except the version is optional; a missing collection means
/// there is nothing of that kind to download. Named collections are kept
/// sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub sevro: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_dl_options: Option<Vec<DownloaderOption>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlists: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<String>>,
}

/// Document shape as decoded from YAML, before validation
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    sevro: String,
    youtube_dl_options: Option<Vec<RawOption>>,
    channel_format: Option<String>,
    playlist_format: Option<String>,
    video_format: Option<String>,
    channels: Option<BTreeMap<String, String>>,
    playlists: Option<BTreeMap<String, String>>,
    videos: Option<Vec<String>>,
}

impl Config {
    /// Read and validate the configuration file at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
        let config = Self::from_yaml(&text)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parse and validate a configuration document
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_yaml::from_str(text)?;

        if raw.sevro != SEVRO_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: raw.sevro,
                expected: SEVRO_VERSION,
            });
        }

        let youtube_dl_options = raw
            .youtube_dl_options
            .map(|options| {
                options
                    .into_iter()
                    .enumerate()
                    .map(|(index, option)| option.into_option(index))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(Self {
            sevro: raw.sevro,
            youtube_dl_options,
            channel_format: raw.channel_format,
            playlist_format: raw.playlist_format,
            video_format: raw.video_format,
            channels: raw.channels,
            playlists: raw.playlists,
            videos: raw.videos,
        })
    }

    /// Base downloader options, if any were configured
    pub fn options(&self) -> Option<&[DownloaderOption]> {
        self.youtube_dl_options.as_deref()
    }

    /// Compiled arguments for a batch using the given output template
    pub fn cli_arguments(&self, format: Option<&str>) -> Vec<Argument> {
        compile(&merge_format(self.options(), format))
    }

    /// Render the effective configuration back to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
