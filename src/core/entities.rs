//! XML Entity Escaping
//!
//! Escapes text that is inserted into raw character data:
//! - `&` becomes `&amp;`
//! - `<` becomes `&lt;`
//! - `>` becomes `&gt;`
//!
//! Original document text is carried verbatim and never re-encoded; only
//! freshly inserted fill values pass through here, so the mutated leaf
//! stays well-formed markup.
//!
//! Uses Cow for zero-copy when nothing needs escaping.

use memchr::memchr3;
use std::borrow::Cow;

/// Escape a fill value for insertion into raw character data
///
/// Returns Borrowed if no markup-significant bytes are present (zero-copy),
/// returns Owned if any byte was escaped.
pub fn escape_text(input: &str) -> Cow<'_, str> {
    // Fast path: check for markup-significant bytes using SIMD
    if memchr3(b'&', b'<', b'>', input.as_bytes()).is_none() {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len() + 8);
    for ch in input.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(ch),
        }
    }
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_escaping_is_borrowed() {
        let out = escape_text("Acme Corporation");
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, "Acme Corporation");
    }

    #[test]
    fn test_ampersand() {
        assert_eq!(escape_text("R&D"), "R&amp;D");
    }

    #[test]
    fn test_angle_brackets() {
        assert_eq!(escape_text("a < b > c"), "a &lt; b &gt; c");
    }

    #[test]
    fn test_already_escaped_input_is_escaped_again() {
        // Fill values are plain text; a literal "&amp;" in one means
        // the ampersand itself must survive rendering
        assert_eq!(escape_text("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_unicode_passthrough() {
        assert_eq!(escape_text("Ngô & Sơn"), "Ngô &amp; Sơn");
    }
}
