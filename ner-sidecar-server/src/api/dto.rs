//! Data transfer objects for the HTTP API

use ner_sidecar::entity_extraction::Entity;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /extract`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExtractRequest {
    /// Text to run entity recognition on
    #[schema(example = "Barack Obama visited Paris.")]
    pub text: String,
}

/// One recognized entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EntityDto {
    /// The span text
    #[schema(example = "Barack Obama")]
    pub text: String,
    /// Entity category, e.g. PERSON, ORG, GPE
    #[schema(example = "PERSON")]
    pub label: String,
    /// Start character offset (inclusive)
    #[schema(example = 0)]
    pub start: usize,
    /// End character offset (exclusive)
    #[schema(example = 12)]
    pub end: usize,
}

impl From<Entity> for EntityDto {
    fn from(entity: Entity) -> Self {
        Self {
            text: entity.text,
            label: entity.label,
            start: entity.start,
            end: entity.end,
        }
    }
}

/// Response of `POST /extract`
///
/// Fields are private so `has_entities` always agrees with `entities`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExtractResponse {
    /// Entities in ascending start offset
    entities: Vec<EntityDto>,
    /// Whether any entity was found
    has_entities: bool,
    /// Recognition time in milliseconds, one decimal place
    #[schema(example = 12.3)]
    duration_ms: f64,
}

impl ExtractResponse {
    /// Build a response; `has_entities` is derived and the duration rounded.
    pub fn new(entities: Vec<EntityDto>, duration_ms: f64) -> Self {
        Self {
            has_entities: !entities.is_empty(),
            entities,
            duration_ms: round_tenths(duration_ms.max(0.0)),
        }
    }

    pub fn entities(&self) -> &[EntityDto] {
        &self.entities
    }

    pub fn has_entities(&self) -> bool {
        self.has_entities
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }
}

/// Response of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    /// Identifier of the loaded model
    #[schema(example = "dslim/bert-base-NER")]
    pub model: String,
}

impl HealthResponse {
    pub fn ok(model: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            model: model.into(),
        }
    }
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_has_entities_is_derived() {
        let empty = ExtractResponse::new(Vec::new(), 1.0);
        assert!(!empty.has_entities());

        let one = ExtractResponse::new(
            vec![EntityDto::from(Entity::new("Paris", "GPE", 21, 26))],
            1.0,
        );
        assert!(one.has_entities());
        assert_eq!(one.entities().len(), 1);
    }

    #[test]
    fn test_duration_rounding() {
        assert_eq!(ExtractResponse::new(Vec::new(), 12.345).duration_ms(), 12.3);
        assert_eq!(ExtractResponse::new(Vec::new(), 12.35001).duration_ms(), 12.4);
        assert_eq!(ExtractResponse::new(Vec::new(), 0.04).duration_ms(), 0.0);
        assert_eq!(ExtractResponse::new(Vec::new(), -3.0).duration_ms(), 0.0);
    }

    #[test]
    fn test_response_wire_format() {
        let response = ExtractResponse::new(
            vec![EntityDto::from(Entity::new("Barack Obama", "PERSON", 0, 12))],
            7.26,
        );
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "entities": [{"text": "Barack Obama", "label": "PERSON", "start": 0, "end": 12}],
                "has_entities": true,
                "duration_ms": 7.3
            })
        );
    }

    #[test]
    fn test_request_requires_text() {
        assert!(serde_json::from_value::<ExtractRequest>(json!({})).is_err());
        assert!(serde_json::from_value::<ExtractRequest>(json!({"text": null})).is_err());

        let request: ExtractRequest =
            serde_json::from_value(json!({"text": "hi", "extra": 1})).unwrap();
        assert_eq!(request.text, "hi");
    }

    #[test]
    fn test_health_response() {
        let value = serde_json::to_value(HealthResponse::ok("rules")).unwrap();
        assert_eq!(value, json!({"status": "ok", "model": "rules"}));
    }
}
