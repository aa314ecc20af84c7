use std::time::Duration;

use crate::url::DEFAULT_GROQ_BASE_URL;

pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Transport configuration for Groq chat-completion requests.
#[derive(Debug, Clone)]
pub struct GroqApiConfig {
    /// API key passed as a bearer token.
    pub api_key: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Base URL for the OpenAI-compatible API surface.
    pub base_url: String,
    /// Optional request timeout. The streamed response can otherwise block
    /// for as long as the transport default allows.
    pub timeout: Option<Duration>,
}

impl Default for GroqApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl GroqApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
