//! API implementation for the NER sidecar

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::limit::RequestBodyLimitLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

pub mod dto;
pub mod extract;
pub mod health;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(extract::extract_entities, health::health_check),
    components(schemas(
        dto::ExtractRequest,
        dto::ExtractResponse,
        dto::EntityDto,
        dto::HealthResponse,
        crate::error::ErrorResponse,
    )),
    tags(
        (name = "extraction", description = "Named-entity recognition"),
        (name = "health", description = "Liveness and loaded model"),
    ),
    info(
        title = "NER Sidecar API",
        version = "1.0.0",
        description = "Runs a pretrained named-entity recognizer over text and reports whether any entity was found.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;

/// Create the router with all API endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let max_request_size = state.config.max_request_size;

    let api_router = Router::new()
        .route("/extract", post(extract::extract_entities))
        .route("/health", get(health::health_check))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_request_size))
        .with_state(state);

    let swagger_router = SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    api_router.merge(swagger_router)
}
