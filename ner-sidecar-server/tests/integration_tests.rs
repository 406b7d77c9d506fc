use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use http::StatusCode;
use ner_sidecar::entity_extraction::{Entity, EntityRecognizer, RuleBasedRecognizer};
use ner_sidecar::{NerError, RULES_MODEL_ID};
use ner_sidecar_server::config::ServerConfig;
use ner_sidecar_server::{AppState, create_router};
use serde_json::{Value, json};

/// Recognizer that fails every call
#[derive(Debug)]
struct FailingRecognizer;

#[async_trait]
impl EntityRecognizer for FailingRecognizer {
    async fn recognize(&self, _text: &str) -> ner_sidecar::Result<Vec<Entity>> {
        Err(NerError::Recognition("model exploded".to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }

    fn labels(&self) -> Vec<String> {
        Vec::new()
    }
}

fn server_with(
    recognizer: Arc<dyn EntityRecognizer>,
    model_id: &str,
    config: ServerConfig,
) -> TestServer {
    let state = Arc::new(AppState::new(recognizer, model_id, config));
    TestServer::new(create_router(state)).expect("Failed to create test server")
}

/// Test server backed by the rule-based recognizer
fn create_test_server() -> TestServer {
    server_with(
        Arc::new(RuleBasedRecognizer::new()),
        RULES_MODEL_ID,
        ServerConfig::default(),
    )
}

fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end - start).collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_json(&json!({"status": "ok", "model": "rules"}));
}

#[tokio::test]
async fn test_health_reports_exact_model_id_after_traffic() {
    let server = server_with(
        Arc::new(RuleBasedRecognizer::new()),
        "./models/My-NER",
        ServerConfig::default(),
    );

    for text in ["Barack Obama visited Paris.", "", "ok thanks"] {
        server
            .post("/extract")
            .json(&json!({ "text": text }))
            .await
            .assert_status_ok();
    }

    let json: Value = server.get("/health").await.json();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["model"], "./models/My-NER");
}

#[tokio::test]
async fn test_extract_person_and_location() {
    let server = create_test_server();

    let response = server
        .post("/extract")
        .json(&json!({"text": "Barack Obama visited Paris."}))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["has_entities"], true);
    assert_eq!(
        json["entities"],
        json!([
            {"text": "Barack Obama", "label": "PERSON", "start": 0, "end": 12},
            {"text": "Paris", "label": "GPE", "start": 21, "end": 26}
        ])
    );
    assert!(json["duration_ms"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_extract_empty_text() {
    let server = create_test_server();

    let response = server.post("/extract").json(&json!({"text": ""})).await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["entities"], json!([]));
    assert_eq!(json["has_entities"], false);
}

#[tokio::test]
async fn test_extract_response_invariants() {
    let server = create_test_server();

    let texts = [
        "ok sounds good, thanks!",
        "I had lunch with Sarah yesterday",
        "We're opening an office in San Francisco",
        "The project budget is $50,000",
        "José and Zoë flew from Zürich to Tokyo on Friday",
        "mail jane@example.com or visit https://example.com/docs",
    ];

    for text in texts {
        let json: Value = server
            .post("/extract")
            .json(&json!({ "text": text }))
            .await
            .json();

        let entities = json["entities"].as_array().unwrap();
        assert_eq!(json["has_entities"], !entities.is_empty(), "{text}");

        let duration = json["duration_ms"].as_f64().unwrap();
        assert!(duration >= 0.0);
        assert_eq!((duration * 10.0).round() / 10.0, duration);

        let char_len = text.chars().count();
        let mut previous_start = 0;
        for entity in entities {
            let start = entity["start"].as_u64().unwrap() as usize;
            let end = entity["end"].as_u64().unwrap() as usize;
            assert!(start <= end && end <= char_len, "{text}: {entity}");
            assert_eq!(char_slice(text, start, end), entity["text"], "{text}");
            assert!(start >= previous_start);
            previous_start = start;
        }
    }
}

#[tokio::test]
async fn test_casual_text_is_filtered_out() {
    let server = create_test_server();

    let json: Value = server
        .post("/extract")
        .json(&json!({"text": "ok sounds good, thanks!"}))
        .await
        .json();

    assert_eq!(json["has_entities"], false);
}

#[tokio::test]
async fn test_missing_text_is_a_client_error() {
    let server = create_test_server();

    let response = server
        .post("/extract")
        .json(&json!({"content": "Barack Obama"}))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let json: Value = response.json();
    assert_eq!(json["error"], "validation_error");
    assert!(json["message"].as_str().unwrap().contains("text"));
}

#[tokio::test]
async fn test_non_string_text_is_a_client_error() {
    let server = create_test_server();

    let response = server
        .post("/extract")
        .json(&json!({"text": 42}))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let server = create_test_server();

    let response = server
        .post("/extract")
        .bytes("{\"text\": ".into())
        .content_type("application/json")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["error"], "bad_request");
}

#[tokio::test]
async fn test_missing_content_type() {
    let server = create_test_server();

    let response = server
        .post("/extract")
        .text("Barack Obama visited Paris.")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_request_body_limit() {
    let config = ServerConfig {
        max_request_size: 64,
        ..Default::default()
    };
    let server = server_with(Arc::new(RuleBasedRecognizer::new()), RULES_MODEL_ID, config);

    let response = server
        .post("/extract")
        .json(&json!({"text": "Paris ".repeat(50)}))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);

    server
        .post("/extract")
        .json(&json!({"text": "Paris"}))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_recognizer_failure_is_server_error() {
    let server = server_with(Arc::new(FailingRecognizer), "failing", ServerConfig::default());

    let response = server
        .post("/extract")
        .json(&json!({"text": "Barack Obama visited Paris."}))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert_eq!(json["error"], "recognition_error");
    assert!(json["message"].as_str().unwrap().contains("model exploded"));

    // The process keeps serving
    server.get("/health").await.assert_status_ok();
}

#[tokio::test]
async fn test_openapi_spec_available() {
    let server = create_test_server();

    let response = server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["info"]["title"], "NER Sidecar API");
    assert!(json["paths"]["/extract"]["post"].is_object());
    assert!(json["paths"]["/health"]["get"].is_object());
}

#[tokio::test]
async fn test_swagger_docs_available() {
    let server = create_test_server();

    let response = server.get("/docs/").await;
    response.assert_status_ok();
}
