//! Configuration validation utilities.

use super::ConfigError;
use super::models::*;

/// Validate the entire configuration.
pub fn validate_config(config: &SidecarConfig) -> Result<(), ConfigError> {
    validate_model_config(&config.model)?;
    validate_logging_config(&config.logging)?;

    Ok(())
}

/// Validate model configuration.
fn validate_model_config(config: &ModelConfig) -> Result<(), ConfigError> {
    if config.id.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Model identifier cannot be empty".to_string(),
        ));
    }

    if config.revision.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Model revision cannot be empty".to_string(),
        ));
    }

    // [CLS] and [SEP] alone take two positions
    if config.max_length < 3 {
        return Err(ConfigError::ValidationError(format!(
            "Model max_length must be at least 3 tokens, got {}",
            config.max_length
        )));
    }

    for (tag, label) in &config.label_aliases {
        if tag.is_empty() || label.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "Label alias entries cannot be empty ('{}' -> '{}')",
                tag, label
            )));
        }
    }

    Ok(())
}

/// Validate logging configuration.
fn validate_logging_config(config: &LoggingConfig) -> Result<(), ConfigError> {
    if !config.stdout && config.file.is_none() {
        return Err(ConfigError::ValidationError(
            "Logging needs at least one sink: enable stdout or set a file".to_string(),
        ));
    }

    Ok(())
}
