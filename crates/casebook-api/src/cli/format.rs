//! Shared formatting helpers for CLI output.

use chrono::{DateTime, Local, Utc};

/// Single-line preview of `text`: whitespace collapsed, capped at
/// `max_chars` characters with a trailing ellipsis when truncated.
///
/// Counts characters, not bytes, so multibyte text never splits mid-char.
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let cut: String = flat.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{cut}...")
}

/// Render a UTC timestamp in the user's local timezone.
pub fn local_time(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}
