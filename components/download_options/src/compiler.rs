use std::fmt;

use crate::option::OptionMap;

/// One compiled command-line option
///
/// Single-character flags take their value as a separate token (`-o value`),
/// longer flags join it with `=` (`--retries=3`). youtube-dl parses both
/// forms, but the short form must not be written as `-o=value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// A single token: `-x`, `--name` or `--name=value`
    Single(String),
    /// A short flag followed by its value: `-x`, `value`
    Pair(String, String),
}

impl Argument {
    /// Build the argument for one map entry
    pub fn new(name: &str, value: Option<&str>) -> Self {
        let short = name.chars().count() == 1;
        match (short, value) {
            (true, None) => Argument::Single(format!("-{name}")),
            (true, Some(value)) => Argument::Pair(format!("-{name}"), value.to_owned()),
            (false, None) => Argument::Single(format!("--{name}")),
            (false, Some(value)) => Argument::Single(format!("--{name}={value}")),
        }
    }

    /// Process tokens for this argument
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            Argument::Single(token) => vec![token.as_str()],
            Argument::Pair(flag, value) => vec![flag.as_str(), value.as_str()],
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Single(token) => write!(f, "{token}"),
            Argument::Pair(flag, value) => write!(f, "{flag} {value}"),
        }
    }
}

/// Compile an [`OptionMap`] into command-line arguments, one per entry, in map order
pub fn compile(options: &OptionMap) -> Vec<Argument> {
    options
        .iter()
        .map(|(name, value)| Argument::new(name, value))
        .collect()
}

/// Flatten compiled arguments into the argument vector passed to the process
pub fn into_tokens(arguments: impl IntoIterator<Item = Argument>) -> Vec<String> {
    let mut tokens = Vec::new();
    for argument in arguments {
        match argument {
            Argument::Single(token) => tokens.push(token),
            Argument::Pair(flag, value) => {
                tokens.push(flag);
                tokens.push(value);
            }
        }
    }
    tokens
}
