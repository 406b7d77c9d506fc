//! Configuration models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default model identifier: a small English BERT checkpoint fine-tuned on CoNLL-2003.
pub const DEFAULT_MODEL_ID: &str = "dslim/bert-base-NER";

/// Default Hugging Face Hub revision.
pub const DEFAULT_REVISION: &str = "main";

/// Default maximum number of tokens fed to a transformer model per request.
pub const DEFAULT_MAX_LENGTH: usize = 512;

/// Top-level sidecar configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SidecarConfig {
    /// Model configuration
    pub model: ModelConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Which model to load and how.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    /// Model identifier: `rules`, a local checkpoint directory or a Hub repository id
    pub id: String,

    /// Hub revision (branch, tag or commit) to download
    pub revision: String,

    /// Hub cache directory; the hub default (`~/.cache/huggingface`) when unset
    pub cache_dir: Option<PathBuf>,

    /// Maximum sequence length in tokens; longer inputs run as overlapping windows
    pub max_length: usize,

    /// Rewrites model-native entity tags into the labels exposed to callers
    pub label_aliases: BTreeMap<String, String>,
}

impl ModelConfig {
    /// Default configuration pointed at a different model identifier.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Resolve a model-native tag through the alias table.
    pub fn resolve_label(&self, tag: &str) -> String {
        self.label_aliases
            .get(tag)
            .cloned()
            .unwrap_or_else(|| tag.to_string())
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        let mut label_aliases = BTreeMap::new();
        label_aliases.insert("PER".to_string(), "PERSON".to_string());

        Self {
            id: DEFAULT_MODEL_ID.to_string(),
            revision: DEFAULT_REVISION.to_string(),
            cache_dir: None,
            max_length: DEFAULT_MAX_LENGTH,
            label_aliases,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,

    /// Log format
    pub format: LogFormat,

    /// File to log to (if any)
    pub file: Option<PathBuf>,

    /// Whether to log to stdout
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Default,
            file: None,
            stdout: true,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level
    Trace,

    /// Debug level
    Debug,

    /// Info level
    Info,

    /// Warn level
    Warn,

    /// Error level
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Default format
    Default,

    /// JSON format
    Json,

    /// Compact format
    Compact,

    /// Pretty format
    Pretty,
}
