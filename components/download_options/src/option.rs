use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ConfigError;

/// A single entry of `youtube_dl_options`
///
/// In the configuration file an entry is either a bare flag name
/// (`- no-warnings`) or a mapping with exactly one pair (`- retries: 3`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloaderOption {
    /// Flag without a value
    Flag(String),
    /// Flag carrying a value
    Valued { name: String, value: String },
}

impl DownloaderOption {
    pub fn flag(name: impl Into<String>) -> Self {
        Self::Flag(name.into())
    }

    pub fn valued(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Valued {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Flag(name) => name,
            Self::Valued { name, .. } => name,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Flag(_) => None,
            Self::Valued { value, .. } => Some(value),
        }
    }
}

impl Serialize for DownloaderOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Flag(name) => serializer.serialize_str(name),
            Self::Valued { name, value } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(name, value)?;
                map.end()
            }
        }
    }
}

/// Option entry exactly as it appears in the YAML document, before validation
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawOption {
    Mapping(BTreeMap<String, Value>),
    /// Bare flag; numeric flags such as `- 4` arrive as numbers
    Flag(Value),
}

impl RawOption {
    /// Validate the entry at position `index` of the option list
    pub(crate) fn into_option(self, index: usize) -> Result<DownloaderOption, ConfigError> {
        match self {
            RawOption::Flag(value) => match scalar_text(&value) {
                Some(Some(name)) if !name.is_empty() => Ok(DownloaderOption::Flag(name)),
                Some(_) => Err(ConfigError::EmptyFlag { index }),
                None => Err(ConfigError::InvalidEntry { index }),
            },
            RawOption::Mapping(map) => {
                if map.len() != 1 {
                    return Err(ConfigError::NotSinglePair {
                        index,
                        count: map.len(),
                    });
                }
                let Some((name, value)) = map.into_iter().next() else {
                    return Err(ConfigError::NotSinglePair { index, count: 0 });
                };
                if name.is_empty() {
                    return Err(ConfigError::EmptyFlag { index });
                }
                match scalar_text(&value) {
                    Some(Some(value)) => Ok(DownloaderOption::Valued { name, value }),
                    Some(None) => Ok(DownloaderOption::Flag(name)),
                    None => Err(ConfigError::NonScalarValue { index, flag: name }),
                }
            }
        }
    }
}

/// Render a YAML scalar as option text. `null` means "no value".
/// Returns `None` for sequences and mappings.
fn scalar_text(value: &Value) -> Option<Option<String>> {
    match value {
        Value::Null => Some(None),
        Value::Bool(b) => Some(Some(b.to_string())),
        Value::Number(n) => Some(Some(n.to_string())),
        Value::String(s) => Some(Some(s.clone())),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}

/// Flattened flag name → optional value mapping
///
/// Keys are unique. Re-inserting a key replaces its value but keeps the
/// position where the key was first seen, so iteration follows the order
/// of the source option list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionMap {
    entries: Vec<(String, Option<String>)>,
}

impl OptionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, replacing any previous value
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Look up a flag. The outer `Option` tells whether the flag is present.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_deref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for OptionMap {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        let mut map = OptionMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

impl fmt::Display for OptionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match value {
                Some(value) => write!(f, "{name}: {value}")?,
                None => write!(f, "{name}")?,
            }
        }
        write!(f, "}}")
    }
}

/// Collapse the option list into an [`OptionMap`]
///
/// Bare flags map to `None`. When a flag appears more than once the last
/// occurrence wins. A missing list yields an empty map.
pub fn normalize(options: Option<&[DownloaderOption]>) -> OptionMap {
    options
        .unwrap_or_default()
        .iter()
        .map(|option| (option.name(), option.value().map(str::to_owned)))
        .collect()
}
