//! Answer post-processing: end-of-sequence marker removal and plain-text
//! cleanup of the accumulated stream.

use std::sync::OnceLock;

use regex::Regex;

const EOS_MARKER: &str = "</s>";

fn emphasis_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| Regex::new(r"\*+").expect("emphasis regex must compile"))
}

/// Strip any literal end-of-sequence marker the model leaked into the text.
pub fn strip_eos_marker(raw: &str) -> String {
    raw.replace(EOS_MARKER, "")
}

/// Remove emphasis markup, trim each line, drop blank lines, and rejoin.
pub fn clean_answer(answer: &str) -> String {
    let without_emphasis = emphasis_regex().replace_all(answer, " ");
    without_emphasis
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
