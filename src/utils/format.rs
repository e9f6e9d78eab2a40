//! Format - Formatting Utilities

use chrono::{DateTime, Local};

/// Format a value with a fixed number of decimals (legend labels)
pub fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Format just the time portion
pub fn format_time(dt: &DateTime<Local>) -> String {
    dt.format("%H:%M:%S").to_string()
}

/// Truncate a string to max chars with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
