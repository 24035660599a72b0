//! Sevro configuration and youtube-dl option handling
//!
//! This component turns the declarative configuration file into the exact
//! argument vector handed to the download tool:
//! - [`Config`] is the validated document
//! - [`normalize`] flattens the mixed option list into an [`OptionMap`]
//! - [`merge_format`] applies a per-batch output template on top
//! - [`compile`] renders the map into command-line [`Argument`]s
//!
//! # Examples
//!
//! ```
//! use download_options::{compile, into_tokens, merge_format, DownloaderOption};
//!
//! let options = vec![
//!     DownloaderOption::valued("retries", "3"),
//!     DownloaderOption::flag("no-warnings"),
//! ];
//! let map = merge_format(Some(options.as_slice()), Some("%(title)s.%(ext)s"));
//! let tokens = into_tokens(compile(&map));
//! assert_eq!(
//!     tokens,
//!     vec!["--retries=3", "--no-warnings", "-o", "%(title)s.%(ext)s"]
//! );
//! ```

mod compiler;
mod config;
mod error;
mod merge;
mod option;

pub use compiler::{compile, into_tokens, Argument};
pub use config::{Config, SEVRO_VERSION};
pub use error::ConfigError;
pub use merge::{merge_format, OUTPUT_TEMPLATE_FLAG};
pub use option::{normalize, DownloaderOption, OptionMap};
