//! Node-span mutation
//!
//! Splices a replacement value into the leaf (or leaves) covered by a
//! matched virtual-text span. Every write goes through
//! `TextNodeIndex::set_leaf_text`, which updates the tree node and the
//! handle cache together, so the next virtual text rebuild is correct.

use crate::dom::XmlDocument;
use crate::index::{TextNodeIndex, VirtualText};

/// Replace the virtual-text byte range [match_start, match_end) with
/// `replacement` (already escaped for raw character data)
///
/// Single leaf: prefix + replacement + suffix within that leaf.
/// Multi-leaf: the start leaf keeps its prefix and receives the whole
/// replacement, interior leaves are emptied, and the end leaf keeps only
/// its suffix. The replacement appears exactly once and every enclosing
/// run stays structurally valid (empty runs are legal).
pub fn splice_span(
    doc: &mut XmlDocument,
    index: &mut TextNodeIndex,
    vt: &VirtualText,
    match_start: usize,
    match_end: usize,
    replacement: &str,
) {
    debug_assert!(match_start < match_end);
    let (Some(start_idx), Some(end_idx)) = (vt.span_at(match_start), vt.span_at(match_end - 1))
    else {
        debug_assert!(false, "matched span has no covering leaves");
        return;
    };

    let start_span = vt.spans[start_idx];
    let end_span = vt.spans[end_idx];
    let start_local = match_start - start_span.start;
    let end_local = match_end - end_span.start;

    if start_idx == end_idx {
        let text = &index.handles()[start_span.handle].text;
        let new_text = format!("{}{}{}", &text[..start_local], replacement, &text[end_local..]);
        index.set_leaf_text(doc, start_span.handle, new_text);
        return;
    }

    // Placeholder fragmented across runs
    let prefix = &index.handles()[start_span.handle].text[..start_local];
    let new_start = format!("{prefix}{replacement}");
    index.set_leaf_text(doc, start_span.handle, new_start);

    for span in &vt.spans[start_idx + 1..end_idx] {
        index.set_leaf_text(doc, span.handle, String::new());
    }

    let suffix = index.handles()[end_span.handle].text[end_local..].to_string();
    index.set_leaf_text(doc, end_span.handle, suffix);
}
