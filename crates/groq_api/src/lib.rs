//! Transport-only client primitives for Groq's OpenAI-compatible
//! chat-completions endpoint.
//!
//! This crate owns request building, SSE stream parsing, and error-body
//! normalization for the completion call only. Conversation state, prompt
//! construction, and retry policy application live in the host crate; the
//! rate-limit signature and backoff table are exported from [`retry`] so the
//! host loop and this transport agree on what counts as rate limiting.

pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod retry;
pub mod sse;
pub mod url;

pub use client::GroqApiClient;
pub use config::GroqApiConfig;
pub use error::GroqApiError;
pub use payload::{ChatCompletionRequest, ChatMessage, ChatRole};
pub use reqwest::StatusCode;
pub use sse::SseStreamParser;
pub use url::normalize_groq_url;
