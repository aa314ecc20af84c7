use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Error as JsonError;

#[derive(Debug)]
pub enum GroqApiError {
    MissingApiKey,
    Request(reqwest::Error),
    Status(StatusCode, String),
    Serde(JsonError),
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayload {
    #[serde(rename = "error")]
    pub value: Option<ErrorPayloadFields>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayloadFields {
    pub message: Option<String>,
    #[allow(dead_code)]
    pub code: Option<String>,
    #[serde(rename = "type")]
    #[allow(dead_code)]
    pub type_: Option<String>,
}

impl fmt::Display for GroqApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "API key is required"),
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Status(status, message) => write!(f, "HTTP {status} {message}"),
            Self::Serde(error) => write!(f, "serialization error: {error}"),
        }
    }
}

impl std::error::Error for GroqApiError {}

impl From<reqwest::Error> for GroqApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

impl From<JsonError> for GroqApiError {
    fn from(error: JsonError) -> Self {
        Self::Serde(error)
    }
}

/// Extract a human-readable message from an upstream error body.
///
/// Bodies usually carry an `{"error": {"message": ...}}` envelope; anything
/// else falls back to the raw body or the status reason.
pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    let fallback = || {
        if body.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            body.to_string()
        }
    };

    let Ok(parsed) = serde_json::from_str::<ErrorPayload>(body) else {
        return fallback();
    };

    parsed
        .value
        .and_then(|fields| fields.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(fallback)
}
