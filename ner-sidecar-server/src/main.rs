use std::sync::Arc;

use anyhow::{Context, Result};
use ner_sidecar::{load_recognizer, logging};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use ner_sidecar_server::cli::CliArgs;
use ner_sidecar_server::config::ServerConfig;
use ner_sidecar_server::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli_args = CliArgs::parse();

    // Load configuration from CLI arguments, environment variables and config file
    let server_config = ServerConfig::from_cli_and_env(cli_args)?;
    let sidecar_config = server_config.sidecar_config()?;

    // Set up logging; the guard flushes the file writer on exit
    let _log_guard = logging::init(&sidecar_config.logging)?;

    info!("Starting NER sidecar v{}", ner_sidecar::VERSION);

    // Load the model before binding so a bad model never accepts connections
    let model_config = sidecar_config.model.clone();
    let recognizer = tokio::task::spawn_blocking(move || load_recognizer(&model_config))
        .await
        .context("model loading task panicked")??;

    let model_id = sidecar_config.model.id.clone();
    let app_state = Arc::new(AppState::new(recognizer, model_id.clone(), server_config.clone()));

    let app = create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr = server_config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Server listening on {} with model '{}'", addr, model_id);
    info!("API documentation available at http://{}/docs", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
