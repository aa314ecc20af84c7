/// Default base URL for the OpenAI-compatible Groq API surface.
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Normalize a base URL to a chat-completions endpoint.
///
/// Rules:
/// 1) keep a URL already ending in `/chat/completions` unchanged
/// 2) append `/chat/completions` otherwise
pub fn normalize_groq_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_GROQ_BASE_URL
    } else {
        input.trim()
    };

    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        return trimmed.to_string();
    }
    format!("{trimmed}/chat/completions")
}
