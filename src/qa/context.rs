//! Context truncation.
//!
//! The hosted model has a bounded input window. We approximate its token
//! limit with a character budget and pass a prefix of the document: crude
//! (may cut mid-word, silently drops late-document content) but cheap and
//! predictable.

/// Character budget for the context passed to the model.
///
/// Roughly three characters per token against a 512-token window.
pub const MAX_CONTEXT_CHARS: usize = 1536;

/// Return `text` unchanged if it fits in `limit` characters, otherwise
/// its first `limit` characters.
///
/// The limit counts characters, not bytes, so truncation never splits a
/// UTF-8 sequence. Pure; recomputed from the full text on every request.
pub fn truncate_context(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(truncate_context("hello", 10), "hello");
    }

    #[test]
    fn test_exact_length_unchanged() {
        let text = "a".repeat(1536);
        assert_eq!(truncate_context(&text, MAX_CONTEXT_CHARS), text);
    }

    #[test]
    fn test_long_text_truncated_to_prefix() {
        let text = "x".repeat(5000);
        let context = truncate_context(&text, MAX_CONTEXT_CHARS);
        assert_eq!(context.chars().count(), MAX_CONTEXT_CHARS);
        assert!(text.starts_with(context));
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(truncate_context("", MAX_CONTEXT_CHARS), "");
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // Four-byte scorpions: byte-based slicing would panic mid-char.
        let text = "\u{1f982}".repeat(10);
        let context = truncate_context(&text, 4);
        assert_eq!(context.chars().count(), 4);
        assert!(text.starts_with(context));
    }
}
