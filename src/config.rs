//! Environment configuration.

use std::env;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_CHAT_LOG_PATH: &str = "Data/ChatLog.json";
pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Required keys absent from the environment. Fatal at startup.
#[derive(Debug, Error)]
#[error("missing required environment variables: {}", keys.join(", "))]
pub struct ConfigError {
    pub keys: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Display name of the person chatting, woven into the system preamble.
    pub username: String,
    /// Display name the assistant answers as.
    pub assistant_name: String,
    /// Groq API credential.
    pub api_key: String,
    pub port: u16,
    pub chat_log_path: String,
    pub assets_dir: String,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let username = env_string_opt("Username");
        let assistant_name = env_string_opt("Assistantname");
        let api_key = env_string_opt("GroqAPIKey");

        let mut missing = Vec::new();
        if username.is_none() {
            missing.push("Username");
        }
        if assistant_name.is_none() {
            missing.push("Assistantname");
        }
        if api_key.is_none() {
            missing.push("GroqAPIKey");
        }

        let (Some(username), Some(assistant_name), Some(api_key)) =
            (username, assistant_name, api_key)
        else {
            return Err(ConfigError { keys: missing });
        };

        Ok(Self {
            username,
            assistant_name,
            api_key,
            port: env_string_opt("CHAT_RELAY_PORT")
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            chat_log_path: env_string_opt("CHAT_LOG_PATH")
                .unwrap_or_else(|| DEFAULT_CHAT_LOG_PATH.to_string()),
            assets_dir: env_string_opt("CHAT_RELAY_ASSETS")
                .unwrap_or_else(|| DEFAULT_ASSETS_DIR.to_string()),
            base_url: env_string_opt("GROQ_BASE_URL"),
            model: env_string_opt("GROQ_MODEL"),
        })
    }
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
