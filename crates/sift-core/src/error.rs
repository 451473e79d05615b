use std::io;
use std::path::PathBuf;

use crate::ignore_set::IgnoreSource;

/// The configuration could not be loaded. Always fatal, raised before any file
/// is processed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse {}:\n{source}", path.display())]
    Toml { path: PathBuf, source: toml::de::Error },

    #[error("Failed to parse {}: {source}", path.display())]
    Json { path: PathBuf, source: serde_json::Error },

    #[error("Cannot find preset `{name}` extended from {}", from.display())]
    PresetNotFound { name: String, from: PathBuf },

    #[error("Preset `{name}` at {} does not contain a sift configuration", path.display())]
    PresetEmpty { name: String, path: PathBuf },

    #[error("Preset cycle detected: {}", chain.join(" -> "))]
    PresetCycle { chain: Vec<String> },

    #[error("Invalid option in {}: {source}", path.display())]
    Option { path: PathBuf, source: OptionError },
}

/// An option value failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionError {
    #[error("Invalid `node-version` \"{value}\": {reason}")]
    NodeVersion { value: String, reason: String },

    #[error("Invalid `space` value \"{0}\": expected a boolean or a positive integer")]
    Space(String),
}

/// Admission failed for the whole invocation. No file is linted.
#[derive(Debug, thiserror::Error)]
pub enum AdmissionError {
    /// `layer` and `pattern` identify the rule that ignores the file.
    #[error("You cannot lint an ignored file: {path}")]
    ExplicitIgnored { path: String, layer: IgnoreSource, pattern: String },

    #[error("No such file or directory: {path}")]
    NotFound { path: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Option(#[from] OptionError),
}
