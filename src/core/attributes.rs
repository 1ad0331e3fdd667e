//! XML Attribute Parsing
//!
//! Parses XML attributes from tag content. Names and values are carried
//! verbatim: no entity decoding, no reordering, no case folding. The quote
//! character used in the source is retained so the serializer can emit the
//! attribute exactly as it was written.

use crate::error::FillError;

/// A parsed XML attribute, referencing the raw tag bytes
#[derive(Debug, Clone)]
pub struct RawAttribute<'a> {
    /// Attribute name, verbatim (may include a namespace prefix)
    pub name: &'a [u8],
    /// Attribute value, verbatim between the quotes (entities untouched)
    pub value: &'a [u8],
    /// The quote character used in the source (b'"' or b'\'')
    pub quote: u8,
}

/// Parse attributes from raw tag content (after the element name)
///
/// Input is the span between the element name and '>' or '/>'. `tag_pos`
/// is the byte offset of the tag in the document, used for error positions.
pub fn parse_attributes(input: &[u8], tag_pos: usize) -> Result<Vec<RawAttribute<'_>>, FillError> {
    let mut attrs = Vec::new();
    let mut pos = 0;

    while pos < input.len() {
        // Skip whitespace
        while pos < input.len() && is_whitespace(input[pos]) {
            pos += 1;
        }

        if pos >= input.len() {
            break;
        }

        // End of attributes (trailing '/' of a self-closing tag)
        if input[pos] == b'/' {
            break;
        }

        // Parse attribute name
        let name_start = pos;
        while pos < input.len() && is_name_char(input[pos]) {
            pos += 1;
        }

        if pos == name_start {
            return Err(FillError::parse(
                "expected attribute name",
                tag_pos + pos,
            ));
        }

        let name = &input[name_start..pos];

        // Skip whitespace around '='
        while pos < input.len() && is_whitespace(input[pos]) {
            pos += 1;
        }

        if pos >= input.len() || input[pos] != b'=' {
            return Err(FillError::parse(
                "attribute missing '=' after name",
                tag_pos + pos,
            ));
        }
        pos += 1;

        while pos < input.len() && is_whitespace(input[pos]) {
            pos += 1;
        }

        // Quoted value
        if pos >= input.len() || (input[pos] != b'"' && input[pos] != b'\'') {
            return Err(FillError::parse(
                "attribute value must be quoted",
                tag_pos + pos,
            ));
        }
        let quote = input[pos];
        pos += 1;

        let value_start = pos;
        while pos < input.len() && input[pos] != quote {
            pos += 1;
        }
        if pos >= input.len() {
            return Err(FillError::parse(
                "unterminated attribute value",
                tag_pos + value_start,
            ));
        }

        attrs.push(RawAttribute {
            name,
            value: &input[value_start..pos],
            quote,
        });
        pos += 1; // closing quote
    }

    Ok(attrs)
}

#[inline]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[inline]
fn is_name_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.' | b':') || b >= 0x80
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_attribute() {
        let attrs = parse_attributes(b" id=\"1\"", 0).unwrap();
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].name, b"id");
        assert_eq!(attrs[0].value, b"1");
        assert_eq!(attrs[0].quote, b'"');
    }

    #[test]
    fn test_order_preserved() {
        let attrs = parse_attributes(b" z=\"1\" a=\"2\" m=\"3\"", 0).unwrap();
        let names: Vec<_> = attrs.iter().map(|a| a.name).collect();
        assert_eq!(names, vec![b"z" as &[u8], b"a", b"m"]);
    }

    #[test]
    fn test_namespaced_name_verbatim() {
        let attrs = parse_attributes(b" xml:space=\"preserve\"", 0).unwrap();
        assert_eq!(attrs[0].name, b"xml:space");
    }

    #[test]
    fn test_value_entities_untouched() {
        let attrs = parse_attributes(b" v=\"a&amp;b\"", 0).unwrap();
        assert_eq!(attrs[0].value, b"a&amp;b");
    }

    #[test]
    fn test_single_quoted_value() {
        let attrs = parse_attributes(b" v='has \"quotes\"'", 0).unwrap();
        assert_eq!(attrs[0].value, b"has \"quotes\"");
        assert_eq!(attrs[0].quote, b'\'');
    }

    #[test]
    fn test_self_closing_slash_stops_parse() {
        let attrs = parse_attributes(b" a=\"1\"/", 0).unwrap();
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_unterminated_value() {
        assert!(parse_attributes(b" a=\"oops", 0).is_err());
    }

    #[test]
    fn test_missing_equals() {
        assert!(parse_attributes(b" standalone", 0).is_err());
    }
}
