use std::path::{Path, PathBuf};

use crate::types::BatchKind;

/// Turn an item name into a single path component
///
/// Only path separators are replaced; `""`, `.` and `..` become `_`.
pub fn sanitize_dir_name(name: &str) -> String {
    match name {
        "" | "." | ".." => "_".to_string(),
        _ => name
            .chars()
            .map(|c| match c {
                '/' | '\\' | '\0' => '_',
                _ => c,
            })
            .collect(),
    }
}

/// Directory the download tool runs in for one item
///
/// Named items get their own directory below the kind's directory, videos
/// all share the kind's directory.
pub fn target_dir(root: impl AsRef<Path>, kind: BatchKind, name: Option<&str>) -> PathBuf {
    let kind_dir = root.as_ref().join(kind.label());
    match name {
        Some(name) => kind_dir.join(sanitize_dir_name(name)),
        None => kind_dir,
    }
}
