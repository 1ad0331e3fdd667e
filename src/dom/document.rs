//! XML Document - Arena-based DOM representation
//!
//! Efficient DOM storage with:
//! - Arena allocation for nodes
//! - NodeId indices for traversal
//! - Source-order child links (never resorted)
//!
//! The tree is mutable in exactly one way: `set_text` on a text leaf.
//! Everything else - element order, attribute order, raw text, prolog
//! markup - is carried verbatim from parse to serialize.

use super::node::{NodeId, NodeKind, XmlAttribute, XmlNode};
use crate::core::attributes::parse_attributes;
use crate::core::tokenizer::{Token, TokenKind, Tokenizer};
use crate::error::FillError;

/// An XML document stored in arena format
pub struct XmlDocument {
    /// Arena of nodes; index 0 is the document node
    nodes: Vec<XmlNode>,
    /// Arena of attributes, referenced by (attr_start, attr_count) ranges
    attributes: Vec<XmlAttribute>,
    /// Root element node ID (not the document node)
    root_element: Option<NodeId>,
}

impl XmlDocument {
    /// Parse an XML document from a byte slice
    ///
    /// The document part must be well-formed: mismatched or unclosed tags,
    /// unterminated constructs, and non-whitespace content outside the root
    /// element are all fatal.
    pub fn parse(input: &[u8]) -> Result<Self, FillError> {
        let mut doc = XmlDocument {
            nodes: Vec::with_capacity(256),
            attributes: Vec::with_capacity(128),
            root_element: None,
        };

        // Create document root node
        doc.nodes.push(XmlNode::document());
        doc.build_from_tokens(input)?;

        if doc.root_element.is_none() {
            return Err(FillError::parse("document has no root element", 0));
        }
        Ok(doc)
    }

    /// Build the arena from tokenizer output
    fn build_from_tokens(&mut self, input: &[u8]) -> Result<(), FillError> {
        let mut tokenizer = Tokenizer::new(input);
        let mut stack: Vec<NodeId> = vec![0]; // Start with document node
        let mut tag_stack: Vec<String> = vec![]; // Track tag names for matching

        loop {
            let token = tokenizer.next_token()?;
            match token.kind {
                TokenKind::Eof => break,

                TokenKind::StartTag => {
                    let node_id = self.push_element(&token, &stack, false)?;
                    tag_stack.push(self.nodes[node_id as usize].name.clone());
                    stack.push(node_id);
                }

                TokenKind::EmptyTag => {
                    self.push_element(&token, &stack, true)?;
                }

                TokenKind::EndTag => {
                    let name = token_str(token.name.unwrap_or_default(), token.span.0)?;
                    match tag_stack.pop() {
                        Some(open) if open == name => {
                            stack.pop();
                        }
                        Some(open) => {
                            return Err(FillError::parse(
                                format!("tag mismatch: <{open}> closed with </{name}>"),
                                token.span.0,
                            ));
                        }
                        None => {
                            return Err(FillError::parse(
                                format!("unexpected end tag </{name}>"),
                                token.span.0,
                            ));
                        }
                    }
                }

                TokenKind::Text => {
                    let content = token.content.unwrap_or_default();
                    let parent_id = *stack.last().unwrap_or(&0);
                    if parent_id == 0 {
                        // Prolog/epilog whitespace is preserved; anything
                        // else outside the root element is malformed
                        let is_whitespace = content
                            .iter()
                            .all(|&b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'));
                        if !is_whitespace {
                            return Err(FillError::parse(
                                "text content outside root element",
                                token.span.0,
                            ));
                        }
                    }
                    let raw = token_str(content, token.span.0)?.to_string();
                    let node = XmlNode::text(raw, Some(parent_id));
                    self.append_node(parent_id, node);
                }

                TokenKind::CData
                | TokenKind::Comment
                | TokenKind::ProcessingInstruction
                | TokenKind::XmlDeclaration
                | TokenKind::DocType => {
                    let kind = match token.kind {
                        TokenKind::CData => NodeKind::CData,
                        TokenKind::Comment => NodeKind::Comment,
                        TokenKind::ProcessingInstruction => NodeKind::ProcessingInstruction,
                        TokenKind::XmlDeclaration => NodeKind::XmlDeclaration,
                        _ => NodeKind::DocType,
                    };
                    let raw = token_str(token.content.unwrap_or_default(), token.span.0)?.to_string();
                    let parent_id = *stack.last().unwrap_or(&0);
                    let node = XmlNode::raw_markup(kind, raw, Some(parent_id));
                    self.append_node(parent_id, node);
                }
            }
        }

        if let Some(unclosed) = tag_stack.first() {
            return Err(FillError::parse(format!("unclosed tag <{unclosed}>"), input.len()));
        }
        Ok(())
    }

    /// Create an element node from a start/empty tag token and link it in
    fn push_element(
        &mut self,
        token: &Token<'_>,
        stack: &[NodeId],
        self_closing: bool,
    ) -> Result<NodeId, FillError> {
        let parent_id = *stack.last().unwrap_or(&0);
        let name = token_str(token.name.unwrap_or_default(), token.span.0)?.to_string();

        if parent_id == 0 && self.root_element.is_some() {
            return Err(FillError::parse(
                "document has multiple root elements",
                token.span.0,
            ));
        }

        let mut node = XmlNode::element(name, Some(parent_id));
        node.self_closing = self_closing;

        let attr_start = self.attributes.len() as u32;
        let raw_attrs = parse_attributes(token.attr_bytes.unwrap_or_default(), token.span.0)?;
        for attr in &raw_attrs {
            let attr_name = token_str(attr.name, token.span.0)?.to_string();
            let attr_value = token_str(attr.value, token.span.0)?.to_string();
            self.attributes
                .push(XmlAttribute::new(attr_name, attr_value, attr.quote));
        }
        node.attr_start = attr_start;
        node.attr_count = raw_attrs.len().min(u16::MAX as usize) as u16;

        let node_id = self.append_node(parent_id, node);
        if self.root_element.is_none() && parent_id == 0 {
            self.root_element = Some(node_id);
        }
        Ok(node_id)
    }

    /// Add a node to the arena and link it as the parent's last child
    fn append_node(&mut self, parent_id: NodeId, node: XmlNode) -> NodeId {
        let node_id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        self.link_child(parent_id, node_id);
        node_id
    }

    /// Link a child node to its parent
    fn link_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        // Get parent's last_child first to avoid borrow issues
        let last_child_opt = self.nodes[parent_id as usize].last_child;

        if let Some(last_child_id) = last_child_opt {
            // Link to previous sibling
            self.nodes[child_id as usize].prev_sibling = Some(last_child_id);
            self.nodes[last_child_id as usize].next_sibling = Some(child_id);
        } else {
            // First child
            self.nodes[parent_id as usize].first_child = Some(child_id);
        }
        self.nodes[parent_id as usize].last_child = Some(child_id);
    }

    /// Get the document root node (index 0)
    pub fn document_node(&self) -> &XmlNode {
        &self.nodes[0]
    }

    /// Get root element ID
    pub fn root_element_id(&self) -> Option<NodeId> {
        self.root_element
    }

    /// Get a node by ID
    pub fn get_node(&self, id: NodeId) -> Option<&XmlNode> {
        self.nodes.get(id as usize)
    }

    /// Get node name (elements only)
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        if node.is_element() {
            Some(node.name.as_str())
        } else {
            None
        }
    }

    /// Get raw text content of a text node
    pub fn text_content(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        if node.is_text() {
            Some(node.text.as_str())
        } else {
            None
        }
    }

    /// Replace the raw text of a text leaf
    ///
    /// The single write path into the tree. Any virtual text derived
    /// before this call is invalid afterwards.
    pub fn set_text(&mut self, id: NodeId, content: String) {
        if let Some(node) = self.nodes.get_mut(id as usize) {
            debug_assert!(node.is_text());
            node.text = content;
        }
    }

    /// Get attributes for an element, in source order
    pub fn attributes(&self, id: NodeId) -> &[XmlAttribute] {
        if let Some(node) = self.get_node(id) {
            let start = node.attr_start as usize;
            let end = start + node.attr_count as usize;
            &self.attributes[start..end]
        } else {
            &[]
        }
    }

    /// Get attribute value by name
    pub fn get_attribute(&self, node_id: NodeId, name: &str) -> Option<&str> {
        self.attributes(node_id)
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Iterate over children of a node
    pub fn children(&self, id: NodeId) -> ChildIter<'_> {
        let first = self.get_node(id).and_then(|n| n.first_child);
        ChildIter { doc: self, next: first }
    }

    /// Iterate over all descendants of a node (depth-first, document order)
    pub fn descendants(&self, id: NodeId) -> DescendantIter<'_> {
        let mut stack = Vec::new();
        if let Some(node) = self.get_node(id) {
            let mut child_id = node.last_child;
            while let Some(cid) = child_id {
                stack.push(cid);
                child_id = self.get_node(cid).and_then(|n| n.prev_sibling);
            }
        }
        DescendantIter { doc: self, stack }
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Iterator over child nodes
pub struct ChildIter<'a> {
    doc: &'a XmlDocument,
    next: Option<NodeId>,
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.get_node(current).and_then(|n| n.next_sibling);
        Some(current)
    }
}

/// Iterator over descendant nodes (depth-first)
pub struct DescendantIter<'a> {
    doc: &'a XmlDocument,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for DescendantIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;

        // Add children to stack in reverse order (so first child is processed first)
        if let Some(node) = self.doc.get_node(current) {
            let mut child_id = node.last_child;
            while let Some(id) = child_id {
                self.stack.push(id);
                child_id = self.doc.get_node(id).and_then(|n| n.prev_sibling);
            }
        }

        Some(current)
    }
}

/// Convert a raw token slice to &str, failing on invalid UTF-8
fn token_str(bytes: &[u8], position: usize) -> Result<&str, FillError> {
    std::str::from_utf8(bytes)
        .map_err(|_| FillError::parse("invalid UTF-8 in document", position))
}
