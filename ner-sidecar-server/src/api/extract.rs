//! Entity extraction endpoint

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::{debug, error, info};

use crate::api::dto::{EntityDto, ExtractRequest, ExtractResponse};
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Extract named entities from text
#[utoipa::path(
    post,
    path = "/extract",
    tag = "extraction",
    request_body = ExtractRequest,
    responses(
        (status = 200, description = "Entities found in the text", body = ExtractResponse),
        (status = 400, description = "Malformed JSON", body = crate::error::ErrorResponse),
        (status = 413, description = "Request body too large"),
        (status = 415, description = "Missing JSON content type", body = crate::error::ErrorResponse),
        (status = 422, description = "Missing or invalid `text` field", body = crate::error::ErrorResponse),
        (status = 500, description = "Recognizer failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn extract_entities(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> ServerResult<Json<ExtractResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        debug!("Rejected extract request: {}", rejection.body_text());
        ServerError::from(rejection)
    })?;

    let started = Instant::now();
    let result = state.recognizer.recognize(&request.text).await;
    let duration_ms = started.elapsed().as_secs_f64() * 1000.0;

    let entities = result.map_err(|e| {
        error!("Entity recognition failed after {:.0}ms: {}", duration_ms, e);
        ServerError::from(e)
    })?;

    if !entities.is_empty() {
        let pairs: Vec<(&str, &str)> = entities
            .iter()
            .map(|entity| (entity.text.as_str(), entity.label.as_str()))
            .collect();
        info!(
            "Found {} entities in {:.0}ms: {:?}",
            entities.len(),
            duration_ms,
            pairs
        );
    }

    let entities = entities.into_iter().map(EntityDto::from).collect();
    Ok(Json(ExtractResponse::new(entities, duration_ms)))
}
