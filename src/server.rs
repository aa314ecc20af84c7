//! HTTP gateway: static asset routes, chat status/submit, health check.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::error;
use serde::Deserialize;
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tower_http::cors::CorsLayer;

use crate::chatbot::{Backoff, ChatBot, CompletionBackend, TokioBackoff};

const FALLBACK_INDEX: &str = "<!DOCTYPE html>\n<html>\n<head>\n    <title>File Not Found</title>\n</head>\n<body>\n    <h1>Error: index.html not found</h1>\n    <p>Make sure index.html is in the assets directory.</p>\n</body>\n</html>\n";
const FALLBACK_CSS: &str = "/* CSS file not found */";
const FALLBACK_JS: &str = "// JavaScript file not found";
const EMPTY_ANSWER_MESSAGE: &str =
    "I'm sorry, I couldn't generate a response. Please try again.";

pub struct AppState<B, S = TokioBackoff> {
    /// `None` renders the 503 paths on `/chat` and `chatbot_available: false`
    /// on `/health`.
    pub chatbot: Option<Arc<ChatBot<B, S>>>,
    pub assets_dir: PathBuf,
}

impl<B, S> Clone for AppState<B, S> {
    fn clone(&self) -> Self {
        Self {
            chatbot: self.chatbot.clone(),
            assets_dir: self.assets_dir.clone(),
        }
    }
}

pub fn router<B, S>(state: AppState<B, S>) -> Router
where
    B: CompletionBackend + 'static,
    S: Backoff + 'static,
{
    Router::new()
        .route("/", get(index::<B, S>))
        .route("/styles.css", get(styles::<B, S>))
        .route("/script.js", get(script::<B, S>))
        .route("/chat", get(chat_status::<B, S>).post(chat::<B, S>))
        .route("/health", get(health::<B, S>))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index<B, S>(State(state): State<AppState<B, S>>) -> Response
where
    B: CompletionBackend + 'static,
    S: Backoff + 'static,
{
    match tokio::fs::read_to_string(state.assets_dir.join("index.html")).await {
        Ok(content) => Html(content).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, Html(FALLBACK_INDEX)).into_response(),
    }
}

async fn styles<B, S>(State(state): State<AppState<B, S>>) -> Response
where
    B: CompletionBackend + 'static,
    S: Backoff + 'static,
{
    serve_asset(&state.assets_dir, "styles.css", "text/css", FALLBACK_CSS).await
}

async fn script<B, S>(State(state): State<AppState<B, S>>) -> Response
where
    B: CompletionBackend + 'static,
    S: Backoff + 'static,
{
    serve_asset(
        &state.assets_dir,
        "script.js",
        "application/javascript",
        FALLBACK_JS,
    )
    .await
}

async fn serve_asset(
    dir: &Path,
    name: &str,
    content_type: &'static str,
    fallback: &'static str,
) -> Response {
    match tokio::fs::read_to_string(dir.join(name)).await {
        Ok(content) => ([(header::CONTENT_TYPE, content_type)], content).into_response(),
        Err(_) => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, content_type)],
            fallback,
        )
            .into_response(),
    }
}

async fn chat_status<B, S>(State(state): State<AppState<B, S>>) -> Response
where
    B: CompletionBackend + 'static,
    S: Backoff + 'static,
{
    if state.chatbot.is_some() {
        Json(json!({
            "status": "available",
            "message": "Chatbot service is running",
        }))
        .into_response()
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unavailable",
                "message": "Chatbot service is not available",
            })),
        )
            .into_response()
    }
}

#[derive(Debug, Deserialize)]
struct ChatRequestBody {
    #[serde(default)]
    message: Option<String>,
}

async fn chat<B, S>(
    State(state): State<AppState<B, S>>,
    body: Result<Json<ChatRequestBody>, JsonRejection>,
) -> Response
where
    B: CompletionBackend + 'static,
    S: Backoff + 'static,
{
    let Some(chatbot) = state.chatbot.as_ref() else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "error": "Chatbot service is not available",
                "response": "Sorry, the AI chatbot service is currently unavailable. Please check the backend configuration.",
            })),
        )
            .into_response();
    };

    let message = match body {
        Ok(Json(ChatRequestBody {
            message: Some(message),
        })) => message,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Invalid request format",
                    "response": "Please provide a message in the request body.",
                })),
            )
                .into_response();
        }
    };

    let message = message.trim();
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Empty message",
                "response": "Please provide a non-empty message.",
            })),
        )
            .into_response();
    }

    match chatbot.reply(message).await {
        Ok(answer) => {
            let answer = if answer.trim().is_empty() {
                EMPTY_ANSWER_MESSAGE.to_string()
            } else {
                answer
            };
            Json(json!({ "response": answer, "status": "success" })).into_response()
        }
        Err(err) => {
            // Internal detail stays server-side.
            error!("chatbot error: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Chatbot processing error",
                    "response": "I encountered an error while processing your message. Please try again.",
                })),
            )
                .into_response()
        }
    }
}

async fn health<B, S>(State(state): State<AppState<B, S>>) -> Response
where
    B: CompletionBackend + 'static,
    S: Backoff + 'static,
{
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();
    Json(json!({
        "status": "healthy",
        "chatbot_available": state.chatbot.is_some(),
        "timestamp": timestamp,
    }))
    .into_response()
}
