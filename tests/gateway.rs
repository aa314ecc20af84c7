use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chat_relay::chatbot::{ChatBot, CompletionBackend, TokioBackoff};
use chat_relay::server::{router, AppState};
use groq_api::{ChatMessage, GroqApiError};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use transcript_store::TranscriptStore;

struct ScriptedBackend {
    results: Mutex<VecDeque<Result<String, GroqApiError>>>,
}

impl ScriptedBackend {
    fn new(results: Vec<Result<String, GroqApiError>>) -> Self {
        Self {
            results: Mutex::new(results.into_iter().collect()),
        }
    }
}

impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, _messages: Vec<ChatMessage>) -> Result<String, GroqApiError> {
        self.results
            .lock()
            .expect("results lock")
            .pop_front()
            .expect("backend called more times than scripted")
    }
}

fn stub_state(
    results: Vec<Result<String, GroqApiError>>,
) -> (TempDir, AppState<ScriptedBackend, TokioBackoff>) {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let store =
        TranscriptStore::open(dir.path().join("ChatLog.json")).expect("store should open");
    let chatbot = ChatBot::new(store, ScriptedBackend::new(results), "alice", "Jarvis");
    let state = AppState {
        chatbot: Some(Arc::new(chatbot)),
        assets_dir: dir.path().join("assets"),
    };
    (dir, state)
}

fn unavailable_state() -> (TempDir, AppState<ScriptedBackend, TokioBackoff>) {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let state = AppState {
        chatbot: None,
        assets_dir: dir.path().join("assets"),
    };
    (dir, state)
}

fn post_chat(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

#[tokio::test]
async fn post_chat_relays_the_answer() {
    let (_dir, state) = stub_state(vec![Ok("Hello there.".to_string())]);

    let response = router(state)
        .oneshot(post_chat(r#"{"message": "Hi"}"#))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["response"], "Hello there.");
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn post_chat_rejects_empty_message() {
    let (_dir, state) = stub_state(vec![]);

    let response = router(state)
        .oneshot(post_chat(r#"{"message": ""}"#))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Empty message");
}

#[tokio::test]
async fn post_chat_rejects_missing_message_field() {
    let (_dir, state) = stub_state(vec![]);

    let response = router(state)
        .oneshot(post_chat(r#"{"text": "Hi"}"#))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Invalid request format");
}

#[tokio::test]
async fn post_chat_rejects_malformed_json() {
    let (_dir, state) = stub_state(vec![]);

    let response = router(state)
        .oneshot(post_chat("{not json"))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn post_chat_maps_component_failure_to_500_with_generic_body() {
    let (_dir, state) = stub_state(vec![Err(GroqApiError::Status(
        StatusCode::BAD_GATEWAY,
        "upstream connect error".to_string(),
    ))]);

    let response = router(state)
        .oneshot(post_chat(r#"{"message": "Hi"}"#))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Chatbot processing error");
    // Internal detail does not leak into the response body.
    assert!(!body["response"]
        .as_str()
        .expect("response should be a string")
        .contains("upstream"));
}

#[tokio::test]
async fn post_chat_replaces_blank_answer_with_fixed_message() {
    let (_dir, state) = stub_state(vec![Ok("   \n".to_string())]);

    let response = router(state)
        .oneshot(post_chat(r#"{"message": "Hi"}"#))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        body["response"],
        "I'm sorry, I couldn't generate a response. Please try again."
    );
}

#[tokio::test]
async fn chat_routes_return_503_without_a_chatbot() {
    let (_dir, state) = unavailable_state();
    let app = router(state);

    let status_response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/chat")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router should respond");
    assert_eq!(status_response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json_body(status_response).await["status"], "unavailable");

    let post_response = app
        .oneshot(post_chat(r#"{"message": "Hi"}"#))
        .await
        .expect("router should respond");
    assert_eq!(post_response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn chat_status_reports_available() {
    let (_dir, state) = stub_state(vec![]);

    let response = router(state)
        .oneshot(
            Request::builder()
                .uri("/chat")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "available");
}

#[tokio::test]
async fn health_reports_chatbot_availability() {
    let (_dir, state) = stub_state(vec![]);

    let response = router(state)
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["chatbot_available"], true);
    assert!(!body["timestamp"]
        .as_str()
        .expect("timestamp should be a string")
        .is_empty());
}

#[tokio::test]
async fn missing_index_returns_404_fallback_page() {
    let (_dir, state) = stub_state(vec![]);

    let response = router(state)
        .oneshot(
            Request::builder()
                .uri("/")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stylesheet_is_served_with_its_content_type() {
    let (dir, state) = stub_state(vec![]);
    std::fs::create_dir_all(dir.path().join("assets")).expect("assets dir should be created");
    std::fs::write(dir.path().join("assets/styles.css"), "body { margin: 0; }")
        .expect("stylesheet should be written");

    let response = router(state)
        .oneshot(
            Request::builder()
                .uri("/styles.css")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .expect("content-type should be set"),
        "text/css"
    );
}
