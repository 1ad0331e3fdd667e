//! Relationship validation
//!
//! The main document part references external resources (images,
//! hyperlinks, embedded objects) through relationship ids resolved by
//! `word/_rels/document.xml.rels`. The table is never regenerated; after
//! an edit it is only consulted to confirm that every id the document
//! still references has an entry. Dangling ids are reported, never fixed.

use std::collections::BTreeMap;

use tracing::warn;

use crate::dom::{NodeKind, XmlDocument};
use crate::error::FillError;

/// Attributes whose value is a relationship id
const REFERENCE_ATTRS: [&str; 3] = ["r:id", "r:embed", "r:link"];

/// Read-only Id to Target map from a relationships part
#[derive(Debug, Default)]
pub struct RelationshipTable {
    targets: BTreeMap<String, String>,
}

impl RelationshipTable {
    /// Parse a `.rels` part
    ///
    /// Entries without an Id are skipped; entries without a Target keep
    /// an empty target, which still satisfies a reference.
    pub fn parse(bytes: &[u8]) -> Result<Self, FillError> {
        let doc = XmlDocument::parse(bytes)?;
        let mut targets = BTreeMap::new();

        if let Some(root) = doc.root_element_id() {
            for child in doc.children(root) {
                let Some(node) = doc.get_node(child) else { continue };
                if node.kind != NodeKind::Element || local_name(&node.name) != "Relationship" {
                    continue;
                }
                let Some(id) = doc.get_attribute(child, "Id") else { continue };
                let target = doc.get_attribute(child, "Target").unwrap_or_default();
                targets.insert(id.to_string(), target.to_string());
            }
        }

        Ok(RelationshipTable { targets })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.targets.contains_key(id)
    }

    pub fn target(&self, id: &str) -> Option<&str> {
        self.targets.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Collect relationship ids the document references but the table lacks
///
/// Advisory only: the caller decides what to do with the list. Each
/// orphan is reported once, in document order.
pub fn find_orphaned_references(doc: &XmlDocument, table: &RelationshipTable) -> Vec<String> {
    let mut orphans: Vec<String> = Vec::new();

    let Some(root) = doc.root_element_id() else {
        return orphans;
    };
    for id in std::iter::once(root).chain(doc.descendants(root)) {
        let Some(node) = doc.get_node(id) else { continue };
        if node.kind != NodeKind::Element {
            continue;
        }
        for attr in REFERENCE_ATTRS {
            let Some(value) = doc.get_attribute(id, attr) else { continue };
            if !table.contains(value) && !orphans.iter().any(|o| o == value) {
                warn!(
                    relationship = value,
                    attribute = attr,
                    "document references a relationship with no table entry"
                );
                orphans.push(value.to_string());
            }
        }
    }

    orphans
}

fn local_name(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}
