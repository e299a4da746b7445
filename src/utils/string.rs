/// Truncate a string to maximum character count (UTF-8 safe).
///
/// The result, including the "..." suffix, is at most `max_chars` long.
#[inline]
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_chars {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", truncated)
}

/// One-line preview: the first `max_chars` characters, then "..." if anything was cut.
///
/// Line breaks are shown as spaces so a multi-line prompt stays on one row.
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let head: String = flat.chars().take(max_chars).collect();
    format!("{}...", head)
}
