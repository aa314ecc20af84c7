use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

/// Maximum retry attempts after an initial request attempt.
pub const MAX_RETRIES: u32 = 3;
/// Delay increment per retry attempt: 2s, 4s, 6s.
pub const DELAY_STEP: Duration = Duration::from_secs(2);

fn rate_limit_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| {
        Regex::new(r"(?i)rate.?limit|429").expect("rate limit regex must compile")
    })
}

/// Rate-limit detection over upstream error text.
///
/// Matches the literal wording the provider currently uses (`rate limit`,
/// `rate_limit`, `429`); breaks silently if that wording changes.
pub fn is_rate_limit_error(error_text: &str) -> bool {
    rate_limit_regex().is_match(error_text)
}

/// Linearly increasing backoff delay for a retry attempt (1-based).
pub fn retry_delay(attempt: u32) -> Duration {
    DELAY_STEP * attempt.clamp(1, MAX_RETRIES)
}
