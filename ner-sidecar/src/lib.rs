//! # NER Sidecar
//!
//! Named-entity recognition behind a single async trait, built to back a
//! small HTTP sidecar used as a cheap pre-filter in front of a more
//! expensive extraction stage.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ner_sidecar::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ModelConfig::with_id(RULES_MODEL_ID);
//!     let recognizer = load_recognizer(&config)?;
//!
//!     let entities = recognizer.recognize("Barack Obama visited Paris.").await?;
//!     for entity in &entities {
//!         println!("{} [{}] {}..{}", entity.text, entity.label, entity.start, entity.end);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Recognizers
//!
//! - **BERT** ([`ml::BertRecognizer`]): a token-classification checkpoint
//!   loaded from a local directory or the Hugging Face Hub and run on candle.
//! - **Rules** ([`entity_extraction::RuleBasedRecognizer`]): regex patterns
//!   and capitalization heuristics, no download required.
//!
//! [`load_recognizer`] picks one from the configured model identifier.

pub mod config;
pub mod entity_extraction;
pub mod logging;
pub mod ml;
pub mod model;

pub use model::{load_recognizer, RULES_MODEL_ID};

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::config::{ConfigLoader, LogFormat, LogLevel, LoggingConfig, ModelConfig, SidecarConfig};
    pub use crate::entity_extraction::{Entity, EntityRecognizer, RuleBasedRecognizer};
    pub use crate::model::{load_recognizer, ModelSource, RULES_MODEL_ID};
    pub use crate::{NerError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for NER sidecar operations
#[derive(Debug, thiserror::Error)]
pub enum NerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] logging::LogError),

    /// Error raised by the model runtime
    #[error("ML error: {0}")]
    ML(#[from] ml::MLError),

    /// The configured model could not be loaded
    #[error("Failed to load model '{model}': {reason}")]
    ModelLoad { model: String, reason: String },

    /// Recognition failed for a request
    #[error("Recognition error: {0}")]
    Recognition(String),
}

impl NerError {
    /// Build a model-load error for the given model identifier.
    pub fn model_load(model: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::ModelLoad {
            model: model.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for NER sidecar operations
pub type Result<T> = std::result::Result<T, NerError>;
