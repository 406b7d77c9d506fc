//! Traits for entity recognition.

use super::Entity;
use crate::Result;
use async_trait::async_trait;

/// A loaded entity recognition model.
///
/// Implementations are shared read-only across concurrent requests, so
/// `recognize` takes `&self` and must be safe to call from many tasks at once.
#[async_trait]
pub trait EntityRecognizer: Send + Sync + std::fmt::Debug {
    /// Find every entity in `text`.
    ///
    /// Entities come back ordered by start offset, with character offsets into
    /// `text`. Empty input yields an empty vector.
    async fn recognize(&self, text: &str) -> Result<Vec<Entity>>;

    /// Short name of the backend (e.g. "bert", "rules").
    fn name(&self) -> &str;

    /// Labels this recognizer can emit.
    fn labels(&self) -> Vec<String>;
}
