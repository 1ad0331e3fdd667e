//! DOM serialization with parse-equivalent fidelity
//!
//! Emits the tree back to bytes under the same constraints the parser
//! honors: source order, verbatim raw text and attribute values, original
//! attribute quote characters, self-closing form kept, prolog markup
//! re-emitted byte for byte. No entity re-encoding, no whitespace
//! injection.

use super::document::XmlDocument;
use super::node::{NodeId, NodeKind};
use crate::error::FillError;

/// Pending work for the iterative traversal
enum Step {
    Open(NodeId),
    Close(NodeId),
}

/// Serialize the document to bytes
pub fn serialize(doc: &XmlDocument) -> Result<Vec<u8>, FillError> {
    let mut out: Vec<u8> = Vec::with_capacity(doc.node_count() * 32);
    let mut stack: Vec<Step> = Vec::new();

    let prolog: Vec<NodeId> = doc.children(0).collect();
    for id in prolog.into_iter().rev() {
        stack.push(Step::Open(id));
    }

    while let Some(step) = stack.pop() {
        match step {
            Step::Open(id) => {
                let node = doc
                    .get_node(id)
                    .ok_or_else(|| FillError::Serialize(format!("dangling node id {id}")))?;
                match node.kind {
                    NodeKind::Element => {
                        out.push(b'<');
                        out.extend_from_slice(node.name.as_bytes());
                        for attr in doc.attributes(id) {
                            out.push(b' ');
                            out.extend_from_slice(attr.name.as_bytes());
                            out.push(b'=');
                            out.push(attr.quote);
                            out.extend_from_slice(attr.value.as_bytes());
                            out.push(attr.quote);
                        }
                        if node.self_closing && !node.has_children() {
                            out.extend_from_slice(b"/>");
                        } else {
                            out.push(b'>');
                            stack.push(Step::Close(id));
                            let children: Vec<NodeId> = doc.children(id).collect();
                            for child in children.into_iter().rev() {
                                stack.push(Step::Open(child));
                            }
                        }
                    }
                    // Text carries raw character data; the other kinds carry
                    // their complete raw markup
                    NodeKind::Text
                    | NodeKind::CData
                    | NodeKind::Comment
                    | NodeKind::ProcessingInstruction
                    | NodeKind::XmlDeclaration
                    | NodeKind::DocType => {
                        out.extend_from_slice(node.text.as_bytes());
                    }
                    NodeKind::Document => {
                        return Err(FillError::Serialize(
                            "document node nested inside tree".to_string(),
                        ));
                    }
                }
            }
            Step::Close(id) => {
                let node = doc
                    .get_node(id)
                    .ok_or_else(|| FillError::Serialize(format!("dangling node id {id}")))?;
                out.extend_from_slice(b"</");
                out.extend_from_slice(node.name.as_bytes());
                out.push(b'>');
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(input: &[u8]) -> Vec<u8> {
        let doc = XmlDocument::parse(input).unwrap();
        serialize(&doc).unwrap()
    }

    #[test]
    fn test_round_trip_simple() {
        let input = b"<root>hello</root>";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn test_round_trip_docx_shape() {
        let input = b"<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\r\n<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"><w:body><w:p><w:r><w:rPr><w:b/></w:rPr><w:t xml:space=\"preserve\">Hello </w:t></w:r></w:p></w:body></w:document>";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn test_round_trip_keeps_entities_raw() {
        let input = b"<t>Smith &amp; Jones &#8211; 2024</t>";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn test_round_trip_keeps_whitespace() {
        let input = b"<a>\n  <b>  spaced  </b>\n</a>";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn test_round_trip_self_closing_and_explicit_empty() {
        let input = b"<r><w:br/><w:t></w:t></r>";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn test_round_trip_single_quoted_attribute() {
        let input = b"<a v='x \"y\"'>t</a>";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn test_round_trip_comment_and_pi() {
        let input = b"<?xml version=\"1.0\"?><!-- keep --><r><?pi data?></r>";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn test_emptied_leaf_serializes_as_open_close() {
        let mut doc = XmlDocument::parse(b"<w:t>gone</w:t>").unwrap();
        let root = doc.root_element_id().unwrap();
        let text_id = doc.children(root).next().unwrap();
        doc.set_text(text_id, String::new());
        assert_eq!(serialize(&doc).unwrap(), b"<w:t></w:t>");
    }
}
