//! XML Node representation
//!
//! Uses NodeId (u32) for compact, cache-friendly node references.
//!
//! Unlike a read-only DOM, nodes own their strings: text leaves are
//! mutated in place during slot filling, so there is no interning pool
//! and no zero-copy span back into the input.

/// Compact node identifier (index into arena)
pub type NodeId = u32;

/// Type of XML node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Document root
    Document,
    /// Element node
    Element,
    /// Text content
    Text,
    /// CDATA section
    CData,
    /// Comment
    Comment,
    /// Processing instruction
    ProcessingInstruction,
    /// XML declaration: <?xml ...?>
    XmlDeclaration,
    /// DOCTYPE declaration
    DocType,
}

/// An XML node in the arena
#[derive(Debug, Clone)]
pub struct XmlNode {
    /// Type of this node
    pub kind: NodeKind,
    /// Parent node (None for document root)
    pub parent: Option<NodeId>,
    /// First child node
    pub first_child: Option<NodeId>,
    /// Last child node
    pub last_child: Option<NodeId>,
    /// Previous sibling
    pub prev_sibling: Option<NodeId>,
    /// Next sibling
    pub next_sibling: Option<NodeId>,
    /// Verbatim qualified tag name (elements only)
    pub name: String,
    /// Raw character data for text nodes; for comments, CDATA, PIs and
    /// declarations, the complete raw markup for verbatim re-emission
    pub text: String,
    /// Start of attributes in attribute arena (elements only)
    pub attr_start: u32,
    /// Number of attributes
    pub attr_count: u16,
    /// True if the source wrote this element as <name/>
    pub self_closing: bool,
}

impl XmlNode {
    /// Create a new document root node
    pub fn document() -> Self {
        XmlNode {
            kind: NodeKind::Document,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            name: String::new(),
            text: String::new(),
            attr_start: 0,
            attr_count: 0,
            self_closing: false,
        }
    }

    /// Create a new element node
    pub fn element(name: String, parent: Option<NodeId>) -> Self {
        XmlNode {
            kind: NodeKind::Element,
            parent,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            name,
            text: String::new(),
            attr_start: 0,
            attr_count: 0,
            self_closing: false,
        }
    }

    /// Create a new text node holding raw character data
    pub fn text(content: String, parent: Option<NodeId>) -> Self {
        XmlNode {
            kind: NodeKind::Text,
            parent,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            name: String::new(),
            text: content,
            attr_start: 0,
            attr_count: 0,
            self_closing: false,
        }
    }

    /// Create a node carrying raw markup re-emitted verbatim
    /// (comment, CDATA, PI, XML declaration, DOCTYPE)
    pub fn raw_markup(kind: NodeKind, raw: String, parent: Option<NodeId>) -> Self {
        XmlNode {
            kind,
            parent,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            name: String::new(),
            text: raw,
            attr_start: 0,
            attr_count: 0,
            self_closing: false,
        }
    }

    /// Check if this is an element node
    #[inline]
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// Check if this is a text node
    #[inline]
    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    /// Check if this node has children
    #[inline]
    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }
}

/// Stored attribute, verbatim from the source
#[derive(Debug, Clone)]
pub struct XmlAttribute {
    /// Attribute name (may include namespace prefix)
    pub name: String,
    /// Attribute value, entities untouched
    pub value: String,
    /// The quote character used in the source (b'"' or b'\'')
    pub quote: u8,
}

impl XmlAttribute {
    pub fn new(name: String, value: String, quote: u8) -> Self {
        XmlAttribute { name, value, quote }
    }
}
