//! Display formatting for cells and table chrome.

/// Format a duration in milliseconds as `m:ss`
pub fn format_duration(ms: i64) -> String {
    let total_seconds = ms.max(0) / 1000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Format a 0..1 fraction as a whole percentage, e.g. `0.734` -> `"73%"`
pub fn format_percentage(value: f64) -> String {
    format!("{}%", (value * 100.0).round() as i64)
}

/// Format a number with a fixed number of decimals
pub fn format_number(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Explicit flag as shown in the table
pub fn format_explicit(explicit: bool) -> &'static str {
    if explicit { "Yes" } else { "No" }
}

/// Format a row count with K/M suffixes (e.g., "1.2K rows")
pub fn format_row_count(count: usize) -> String {
    let formatted = if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    };

    if count == 1 {
        format!("{} row", formatted)
    } else {
        format!("{} rows", formatted)
    }
}

/// Format current position for display (e.g., "1-50 of 1.2K").
///
/// `start` is 0-based and `end` exclusive; an empty range shows `0-0`.
pub fn format_position(start: usize, end: usize, total: usize) -> String {
    let display_end = end.min(total);
    let display_start = if display_end == 0 { 0 } else { start + 1 }; // 1-indexed for users

    if total >= 1_000_000 {
        format!(
            "{}-{} of {:.1}M",
            display_start,
            display_end,
            total as f64 / 1_000_000.0
        )
    } else if total >= 1_000 {
        format!(
            "{}-{} of {:.1}K",
            display_start,
            display_end,
            total as f64 / 1_000.0
        )
    } else {
        format!("{}-{} of {}", display_start, display_end, total)
    }
}
