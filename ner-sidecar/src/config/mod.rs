//! Configuration system for the NER sidecar.
//!
//! Configuration is layered with figment: built-in defaults, then an optional
//! file (TOML, YAML or JSON), then `NER_SIDECAR_*` environment variables.
//! Nested keys use a double underscore, e.g. `NER_SIDECAR_MODEL__MAX_LENGTH`.

mod loader;
mod models;
#[cfg(test)]
mod tests;
mod validation;

pub use loader::ConfigLoader;
pub use models::*;
pub use validation::validate_config;

/// Default configuration file names that the loader will look for
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "ner-sidecar.toml",
    "ner-sidecar.yaml",
    "ner-sidecar.yml",
    "ner-sidecar.json",
];

/// Environment variable prefix for sidecar configuration
pub const ENV_PREFIX: &str = "NER_SIDECAR_";

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error occurred during file loading
    #[error("Failed to load configuration file: {0}")]
    FileLoadError(String),

    /// Error occurred during validation
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// Error occurred during parsing
    #[error("Configuration parsing error: {0}")]
    ParseError(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
