use futures_util::StreamExt;
use reqwest::Client;

use crate::config::GroqApiConfig;
use crate::error::{parse_error_message, GroqApiError};
use crate::payload::ChatCompletionRequest;
use crate::sse::SseStreamParser;
use crate::url::normalize_groq_url;

#[derive(Debug)]
pub struct GroqApiClient {
    http: Client,
    config: GroqApiConfig,
}

impl GroqApiClient {
    pub fn new(config: GroqApiConfig) -> Result<Self, GroqApiError> {
        if config.api_key.trim().is_empty() {
            return Err(GroqApiError::MissingApiKey);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(GroqApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GroqApiConfig {
        &self.config
    }

    pub fn normalized_endpoint(&self) -> String {
        normalize_groq_url(&self.config.base_url)
    }

    /// Submit a streaming completion request and concatenate the streamed
    /// content fragments in arrival order.
    ///
    /// The byte stream is consumed to completion before returning; there are
    /// no partial reads. Non-success statuses become
    /// [`GroqApiError::Status`] with the upstream message extracted from the
    /// error body.
    pub async fn complete(&self, request: &ChatCompletionRequest) -> Result<String, GroqApiError> {
        let response = self
            .http
            .post(self.normalized_endpoint())
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(GroqApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(GroqApiError::Status(status, parse_error_message(status, &body)));
        }

        let mut bytes = response.bytes_stream();
        let mut parser = SseStreamParser::default();
        let mut answer = String::new();

        while let Some(chunk) = bytes.next().await {
            let chunk = chunk.map_err(GroqApiError::from)?;
            for delta in parser.feed(&chunk) {
                answer.push_str(&delta);
            }
        }

        Ok(answer)
    }
}
