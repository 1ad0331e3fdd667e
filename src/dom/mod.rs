//! Mutable, order-preserving XML DOM
//!
//! An arena-based tree mirroring the source markup exactly: element and
//! attribute order are source order, raw text is verbatim, and the only
//! mutation is replacing a text leaf's content.

pub mod document;
pub mod node;
pub mod serializer;

pub use document::XmlDocument;
pub use node::{NodeId, NodeKind, XmlAttribute, XmlNode};
pub use serializer::serialize;
