//! Common display utilities and helpers

use chrono::{DateTime, Utc};

/// Placeholder for absent values
pub const EMPTY: &str = "--";

/// Truncate string to max characters with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format a timestamp as a calendar date (YYYY-MM-DD)
pub fn format_date(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| EMPTY.to_string())
}
