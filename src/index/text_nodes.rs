//! Text node indexing
//!
//! Depth-first walk over the DOM registering one handle per text leaf
//! found inside a recognized run-text container (`w:t` by default), in
//! exact traversal order - which equals reading order because the tree
//! preserves source order.
//!
//! Each handle caches its leaf's text. The cache is written by the same
//! call that mutates the tree (`set_leaf_text`); there is no lazy re-read
//! path, so a stale cache cannot exist.

use crate::dom::{NodeId, XmlDocument};

/// A reference to exactly one text leaf
#[derive(Debug, Clone)]
pub struct TextNodeHandle {
    /// The text leaf in the DOM arena
    pub node: NodeId,
    /// Cached leaf text, kept in sync with the tree on every mutation
    pub text: String,
}

/// Ordered collection of all text leaves eligible for slot filling
#[derive(Debug, Default)]
pub struct TextNodeIndex {
    handles: Vec<TextNodeHandle>,
}

impl TextNodeIndex {
    /// Walk the document and register every text leaf contained in a
    /// recognized run-text container
    ///
    /// Zero registered leaves is not an error; every subsequent
    /// replacement request will simply report "not found".
    pub fn collect(doc: &XmlDocument, run_text_tags: &[String]) -> Self {
        let mut index = TextNodeIndex { handles: Vec::new() };
        if let Some(root) = doc.root_element_id() {
            index.visit_element(doc, root, run_text_tags);
        }
        index
    }

    /// Recurse through arbitrarily deep formatting wrappers; a recognized
    /// container contributes its text leaves and is not re-entered
    fn visit_element(&mut self, doc: &XmlDocument, id: NodeId, run_text_tags: &[String]) {
        let Some(node) = doc.get_node(id) else { return };
        if run_text_tags.iter().any(|tag| *tag == node.name) {
            self.register_leaves(doc, id);
            return;
        }
        for child in doc.children(id) {
            let Some(child_node) = doc.get_node(child) else { continue };
            if child_node.is_element() {
                self.visit_element(doc, child, run_text_tags);
            }
        }
    }

    /// Register every text leaf under a recognized container
    ///
    /// A handle's position in the vector is its document-order index.
    fn register_leaves(&mut self, doc: &XmlDocument, container: NodeId) {
        for descendant in doc.descendants(container) {
            if let Some(text) = doc.text_content(descendant) {
                self.handles.push(TextNodeHandle {
                    node: descendant,
                    text: text.to_string(),
                });
            }
        }
    }

    /// Replace a leaf's text in the tree and the handle cache together
    pub fn set_leaf_text(&mut self, doc: &mut XmlDocument, handle_index: usize, text: String) {
        let handle = &mut self.handles[handle_index];
        doc.set_text(handle.node, text.clone());
        handle.text = text;
    }

    /// The handles, in document order
    pub fn handles(&self) -> &[TextNodeHandle] {
        &self.handles
    }

    /// Number of registered text leaves
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// True when no run text exists in the document
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
