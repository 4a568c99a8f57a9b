const ELLIPSIS: &str = "...";

/// Shortens `text` to at most `max_chars` characters, ending with `...` when cut.
///
/// Counts chars rather than bytes so multi-byte text is never split mid-character.
pub fn truncate_display(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}
