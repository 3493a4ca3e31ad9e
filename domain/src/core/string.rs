//! String utilities for the domain layer.

/// Cut a string down to at most `max_chars` characters, appending `...`
/// when anything was removed.
///
/// Counts characters rather than bytes so previews of CJK or emoji text
/// keep the same visible length as ASCII ones.
pub fn preview(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((end, _)) => format!("{}...", &s[..end]),
    }
}
