//! Decode configuration
//!
//! Loaded from YAML. Every field is optional; a missing file means defaults.
//!
//! ```yaml
//! punctuation_tags: ["$", "``", "''", "(", ")", ",", "--", ".", ":"]
//! report_unresolved: true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Penn treebank tags that never become a sentence root
pub const DEFAULT_PUNCTUATION_TAGS: [&str; 9] = ["$", "``", "''", "(", ")", ",", "--", ".", ":"];

/// Errors loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Options for decoding a response into a graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Part-of-speech tags excluded from root candidacy
    pub punctuation_tags: Vec<String>,
    /// Log dangling link requests at warn level instead of debug
    pub report_unresolved: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            punctuation_tags: DEFAULT_PUNCTUATION_TAGS.iter().map(|t| t.to_string()).collect(),
            report_unresolved: false,
        }
    }
}

impl DecodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_punctuation_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.punctuation_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_report_unresolved(mut self, report: bool) -> Self {
        self.report_unresolved = report;
        self
    }

    /// Whether `tag` is excluded from root candidacy
    pub fn is_punctuation(&self, tag: &str) -> bool {
        self.punctuation_tags.iter().any(|t| t == tag)
    }

    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from a YAML file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Load from `path` if it exists, otherwise defaults
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Default config location (~/.config/textgraph/config.yaml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("textgraph").join("config.yaml"))
    }
}
