//! Error types for ML operations

use std::fmt;
use thiserror::Error;
use tracing::error;

/// Error type for ML operations
#[derive(Debug, Error)]
pub enum MLError {
    /// Error during model loading
    #[error("Failed to load model: {0}")]
    ModelLoading(String),

    /// Error during tokenization
    #[error("Tokenization error: {0}")]
    Tokenization(String),

    /// Error during the forward pass or while decoding its output
    #[error("Inference error: {0}")]
    Inference(String),

    /// Error related to model configuration
    #[error("Model configuration error: {0}")]
    Configuration(String),

    /// Model files could not be found locally or on the hub
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// IO error during model operations
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}

impl MLError {
    /// Create a new model loading error
    pub fn model_loading(msg: impl fmt::Display) -> Self {
        Self::ModelLoading(msg.to_string())
    }

    /// Create a new tokenization error
    pub fn tokenization(msg: impl fmt::Display) -> Self {
        Self::Tokenization(msg.to_string())
    }

    /// Create a new inference error
    pub fn inference(msg: impl fmt::Display) -> Self {
        Self::Inference(msg.to_string())
    }

    /// Create a new configuration error
    pub fn configuration(msg: impl fmt::Display) -> Self {
        Self::Configuration(msg.to_string())
    }

    /// Create a new model not found error
    pub fn model_not_found(msg: impl fmt::Display) -> Self {
        Self::ModelNotFound(msg.to_string())
    }
}

impl From<candle_core::Error> for MLError {
    fn from(err: candle_core::Error) -> Self {
        error!("Candle error: {}", err);
        Self::Inference(summarize(&err))
    }
}

/// Message of a candle error without the captured backtrace.
fn summarize(err: &candle_core::Error) -> String {
    match err {
        candle_core::Error::WithBacktrace { inner, .. } => summarize(inner),
        candle_core::Error::Context { inner, context } => {
            format!("{}: {}", context, summarize(inner))
        }
        candle_core::Error::WithPath { inner, path } => {
            format!("{}: {}", path.display(), summarize(inner))
        }
        other => other.to_string(),
    }
}

/// Result type for ML operations
pub type Result<T> = std::result::Result<T, MLError>;
