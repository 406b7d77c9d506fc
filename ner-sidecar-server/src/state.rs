//! Application state management

use std::sync::Arc;

use ner_sidecar::entity_extraction::EntityRecognizer;

use crate::config::ServerConfig;

/// Application state shared across all handlers
///
/// Built once at startup after the model has loaded and never mutated.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The loaded recognizer
    pub recognizer: Arc<dyn EntityRecognizer>,

    /// Model identifier the recognizer was loaded from
    pub model_id: String,

    /// Server configuration
    pub config: ServerConfig,
}

impl AppState {
    /// Create new application state
    pub fn new(
        recognizer: Arc<dyn EntityRecognizer>,
        model_id: impl Into<String>,
        config: ServerConfig,
    ) -> Self {
        Self {
            recognizer,
            model_id: model_id.into(),
            config,
        }
    }
}
