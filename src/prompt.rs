//! System preamble and real-time-info construction.
//!
//! Both strings are injected into the outbound message list on every call and
//! never persisted to the transcript store.

use time::OffsetDateTime;

/// Fixed system preamble identifying the assistant persona.
pub fn system_preamble(username: &str, assistant_name: &str) -> String {
    format!(
        "Hello, I am {username}, You are a very accurate and advanced AI chatbot named {assistant_name} which also has real-time up-to-date information from the internet.\n\
*** Do not tell time until I ask, do not talk too much, just answer the question.***\n\
*** Reply in only English, even if the question is in Hindi, reply in English.***\n\
*** Do not provide notes in the output, just answer the question and never mention your training data. ***\n"
    )
}

/// Current day/date/month/year/time, formatted for the model.
pub fn realtime_information() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    realtime_information_at(now)
}

pub fn realtime_information_at(now: OffsetDateTime) -> String {
    format!(
        "Please use the real-time information if needed,\n\
Day: {day}\nDate: {date:02}\nMonth: {month}\nYear: {year}\n\
Time: {hour:02} Hours: {minute:02} Minutes: {second:02} second.\n",
        day = now.weekday(),
        date = now.day(),
        month = now.month(),
        year = now.year(),
        hour = now.hour(),
        minute = now.minute(),
        second = now.second(),
    )
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::{realtime_information_at, system_preamble};

    #[test]
    fn preamble_carries_both_display_names() {
        let preamble = system_preamble("alice", "Jarvis");
        assert!(preamble.contains("I am alice"));
        assert!(preamble.contains("named Jarvis"));
        assert!(preamble.contains("Reply in only English"));
    }

    #[test]
    fn realtime_line_layout_is_stable() {
        let now = datetime!(2026-08-31 09:05:07 UTC);
        assert_eq!(
            realtime_information_at(now),
            "Please use the real-time information if needed,\n\
Day: Monday\nDate: 31\nMonth: August\nYear: 2026\n\
Time: 09 Hours: 05 Minutes: 07 second.\n"
        );
    }
}
