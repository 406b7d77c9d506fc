use std::sync::Arc;

use axum::{Json, extract::State};

use crate::api::dto::HealthResponse;
use crate::state::AppState;

/// Liveness check reporting the loaded model
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up and the model is loaded", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.model_id.clone()))
}
