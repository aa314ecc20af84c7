//! The chat completion component: transcript read/modify/write around one
//! outbound completion call, with bounded rate-limit retries.

use std::future::Future;
use std::time::Duration;

use groq_api::retry::{is_rate_limit_error, retry_delay, MAX_RETRIES};
use groq_api::{ChatCompletionRequest, ChatMessage, ChatRole, GroqApiClient, GroqApiError};
use log::warn;
use thiserror::Error;
use transcript_store::{Role, TranscriptStore, TranscriptStoreError, Turn};

use crate::answer::{clean_answer, strip_eos_marker};
use crate::prompt::{realtime_information, system_preamble};

/// Fixed user-facing message returned after the retry budget is exhausted.
pub const RATE_LIMIT_MESSAGE: &str =
    "Error: rate limit reached. Please try again in a few seconds.";

#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Store(#[from] TranscriptStoreError),
    #[error(transparent)]
    Api(#[from] GroqApiError),
}

/// One completion call over a prepared message list.
///
/// Seam for the gateway and retry tests: the production implementation wraps
/// [`GroqApiClient`], stubs swap in canned results.
pub trait CompletionBackend: Send + Sync {
    fn complete(
        &self,
        messages: Vec<ChatMessage>,
    ) -> impl Future<Output = Result<String, GroqApiError>> + Send;
}

pub struct GroqBackend {
    client: GroqApiClient,
}

impl GroqBackend {
    pub fn new(client: GroqApiClient) -> Self {
        Self { client }
    }
}

impl CompletionBackend for GroqBackend {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, GroqApiError> {
        let request = ChatCompletionRequest::new(self.client.config().model.clone(), messages);
        self.client.complete(&request).await
    }
}

/// Injectable delay between retry attempts.
pub trait Backoff: Send + Sync {
    fn sleep(&self, delay: Duration) -> impl Future<Output = ()> + Send;
}

#[derive(Debug, Default)]
pub struct TokioBackoff;

impl Backoff for TokioBackoff {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

pub struct ChatBot<B, S = TokioBackoff> {
    store: TranscriptStore,
    backend: B,
    preamble: String,
    backoff: S,
}

impl<B: CompletionBackend> ChatBot<B> {
    pub fn new(store: TranscriptStore, backend: B, username: &str, assistant_name: &str) -> Self {
        Self::with_backoff(store, backend, username, assistant_name, TokioBackoff)
    }
}

impl<B: CompletionBackend, S: Backoff> ChatBot<B, S> {
    pub fn with_backoff(
        store: TranscriptStore,
        backend: B,
        username: &str,
        assistant_name: &str,
        backoff: S,
    ) -> Self {
        Self {
            store,
            backend,
            preamble: system_preamble(username, assistant_name),
            backoff,
        }
    }

    /// Run one completion call for `query`, retrying on rate limits.
    ///
    /// A first-attempt failure without a rate-limit signature is returned to
    /// the caller. Once rate limiting is detected the whole operation is
    /// retried up to [`MAX_RETRIES`] times with linearly increasing delays,
    /// ending in the fixed [`RATE_LIMIT_MESSAGE`]. The on-disk store is never
    /// modified by a failed attempt.
    pub async fn reply(&self, query: &str) -> Result<String, ChatError> {
        let mut attempt = 0u32;
        loop {
            let error = match self.try_reply(query).await {
                Ok(answer) => return Ok(answer),
                Err(error) => error,
            };

            let text = error.to_string();
            if attempt == 0 && !is_rate_limit_error(&text) {
                return Err(error);
            }
            if attempt >= MAX_RETRIES {
                warn!("giving up after {MAX_RETRIES} rate-limit retries: {text}");
                return Ok(RATE_LIMIT_MESSAGE.to_string());
            }

            attempt += 1;
            let delay = retry_delay(attempt);
            warn!(
                "rate limit detected, retrying in {}s (attempt {attempt}/{MAX_RETRIES}): {text}",
                delay.as_secs()
            );
            self.backoff.sleep(delay).await;
        }
    }

    async fn try_reply(&self, query: &str) -> Result<String, ChatError> {
        let mut transcript = self.store.load()?;
        transcript.push(Turn::user(query));

        let mut outbound = Vec::with_capacity(transcript.len() + 2);
        outbound.push(ChatMessage::system(&self.preamble));
        outbound.push(ChatMessage::system(realtime_information()));
        outbound.extend(transcript.iter().map(to_chat_message));

        let raw = self.backend.complete(outbound).await?;
        let answer = strip_eos_marker(&raw);

        transcript.push(Turn::assistant(&answer));
        self.store.save(&transcript)?;

        Ok(clean_answer(&answer))
    }
}

fn to_chat_message(turn: &Turn) -> ChatMessage {
    let role = match turn.role {
        Role::System => ChatRole::System,
        Role::User => ChatRole::User,
        Role::Assistant => ChatRole::Assistant,
    };
    ChatMessage {
        role,
        content: turn.content.clone(),
    }
}

impl<B, S> ChatBot<B, S> {
    pub fn store(&self) -> &TranscriptStore {
        &self.store
    }
}

impl<B, S> std::fmt::Debug for ChatBot<B, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatBot")
            .field("store", &self.store.path())
            .finish_non_exhaustive()
    }
}
