use crate::option::{normalize, DownloaderOption, OptionMap};

/// youtube-dl's output template flag
pub const OUTPUT_TEMPLATE_FLAG: &str = "o";

/// Combine the base options with a batch's output template
///
/// The base list is normalized first, then a non-empty `format` is set as
/// `-o`, replacing any `o` already present in the base options.
pub fn merge_format(base: Option<&[DownloaderOption]>, format: Option<&str>) -> OptionMap {
    let mut options = normalize(base);
    if let Some(format) = format.filter(|format| !format.is_empty()) {
        options.insert(OUTPUT_TEMPLATE_FLAG, Some(format.to_owned()));
    }
    tracing::debug!(%options, "merged downloader options");
    options
}
