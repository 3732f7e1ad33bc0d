//! String utilities
//!
//! Character-boundary-safe helpers used when echoing prompts back to clients
//! and into logs.

/// Keep at most `max_chars` characters of `s`.
///
/// Cuts on a `char` boundary, so multi-byte text (the mock replies are in
/// Russian) is never split mid-character.
///
/// # Example
/// ```
/// use dream_weaver_proxy::utils::truncate_str;
///
/// assert_eq!(truncate_str("Вы сказали", 2), "Вы");
/// assert_eq!(truncate_str("castle", 50), "castle");
/// ```
pub fn truncate_str(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Number of characters in `s`, used as a stand-in for token counts.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Escape the five XML special characters.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
