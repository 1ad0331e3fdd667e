//! Virtual text: the flattened view of all run text
//!
//! A pure function of the handle list: the concatenation of every leaf's
//! text plus a span map locating each leaf within it. The view is
//! ephemeral - invalid the instant any leaf mutates - and is rebuilt from
//! scratch before every lookup. No offsets are ever cached across edits.
//!
//! Offsets are byte offsets into the UTF-8 concatenation. A well-formed
//! needle can only match on character boundaries, so leaf-local slicing
//! at match edges is always valid.

use super::text_nodes::TextNodeIndex;

/// One leaf's byte range within the virtual text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSpan {
    /// Cumulative offset before this leaf
    pub start: usize,
    /// Cumulative offset after this leaf
    pub end: usize,
    /// Index into the handle list
    pub handle: usize,
}

/// The flattened document text with its offset-to-leaf map
#[derive(Debug)]
pub struct VirtualText {
    pub text: String,
    pub spans: Vec<NodeSpan>,
}

impl VirtualText {
    /// Concatenate every handle's cached text, recording each leaf's span
    ///
    /// An emptied leaf stays in the map as a zero-width span.
    pub fn build(index: &TextNodeIndex) -> Self {
        let handles = index.handles();
        let mut text = String::with_capacity(handles.iter().map(|h| h.text.len()).sum());
        let mut spans = Vec::with_capacity(handles.len());

        for (i, handle) in handles.iter().enumerate() {
            let start = text.len();
            text.push_str(&handle.text);
            spans.push(NodeSpan {
                start,
                end: text.len(),
                handle: i,
            });
        }

        VirtualText { text, spans }
    }

    /// Find the handle whose span contains the given byte offset
    ///
    /// Zero-width spans contain no offset and are skipped.
    pub fn span_at(&self, offset: usize) -> Option<usize> {
        // First span whose end is past the offset; zero-width spans at the
        // same position sort before it and are stepped over
        let idx = self.spans.partition_point(|span| span.end <= offset);
        let span = self.spans.get(idx)?;
        (span.start <= offset).then_some(idx)
    }
}
