use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Request payload for the chat-completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default = "default_true")]
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
}

fn default_true() -> bool {
    true
}

impl ChatCompletionRequest {
    /// Build a streaming request with the fixed sampling parameters used for
    /// every completion call: bounded output, moderate temperature, full
    /// nucleus sampling, no stop sequence.
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens: Some(1024),
            temperature: Some(0.7),
            top_p: Some(1.0),
            stream: true,
            stop: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChatCompletionRequest, ChatMessage};

    #[test]
    fn request_serializes_with_fixed_parameters_and_no_stop_field() {
        let request =
            ChatCompletionRequest::new("llama-3.1-8b-instant", vec![ChatMessage::user("hi")]);
        let value = serde_json::to_value(&request).expect("request should serialize");

        assert_eq!(value["model"], "llama-3.1-8b-instant");
        assert_eq!(value["max_tokens"], 1024);
        assert_eq!(value["temperature"], 0.7);
        assert_eq!(value["top_p"], 1.0);
        assert_eq!(value["stream"], true);
        assert!(value.get("stop").is_none());
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hi");
    }
}
