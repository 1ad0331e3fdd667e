//! Sequential slot replacement
//!
//! Requests are processed strictly in order against a forward-only
//! cursor. Before each attempt the virtual text is rebuilt from the
//! current leaf state, so every search sees the document as the previous
//! edits left it. The cursor only ever moves forward: after a successful
//! match it lands just past the matched region (measured in original
//! lengths), and a miss leaves it where it was so later requests still
//! get their chance.

use memchr::memmem;
use tracing::{debug, warn};

use crate::core::entities::escape_text;
use crate::dom::XmlDocument;
use crate::fill::splice::splice_span;
use crate::index::{TextNodeIndex, VirtualText};

/// One placeholder to fill: the literal text currently in the document
/// and the value that should replace it
#[derive(Debug, Clone)]
pub struct SlotRequest {
    /// Caller-assigned identifier, echoed back in the outcome
    pub id: String,
    /// Exact literal to locate in the virtual text
    pub original_text: String,
    /// Replacement value, raw (escaped on insertion)
    pub filled_value: String,
}

/// What happened to a single request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    /// Matched and spliced into the document
    Replaced,
    /// Matched but the value equals the original; nothing written
    Skipped,
    /// No occurrence at or after the cursor
    NotFound,
}

/// Per-request outcome, in request order
#[derive(Debug, Clone)]
pub struct SlotOutcome {
    pub id: String,
    pub status: SlotStatus,
}

/// Aggregate counts over one engine pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FillCounts {
    pub changed: usize,
    pub skipped: usize,
    pub not_found: usize,
}

/// Run every request against the document, in order
///
/// Duplicate literals resolve by position: each successful match consumes
/// the earliest occurrence at or after the cursor, so the first request
/// binds the first occurrence and so on. A miss never stalls the queue.
pub fn apply_requests(
    doc: &mut XmlDocument,
    index: &mut TextNodeIndex,
    requests: Vec<SlotRequest>,
) -> (FillCounts, Vec<SlotOutcome>) {
    let mut counts = FillCounts::default();
    let mut outcomes = Vec::with_capacity(requests.len());
    let mut cursor = 0usize;

    for request in requests {
        let vt = VirtualText::build(index);
        let status = apply_one(doc, index, &vt, &request, &mut cursor);
        match status {
            SlotStatus::Replaced => counts.changed += 1,
            SlotStatus::Skipped => counts.skipped += 1,
            SlotStatus::NotFound => counts.not_found += 1,
        }
        outcomes.push(SlotOutcome {
            id: request.id,
            status,
        });
    }

    (counts, outcomes)
}

fn apply_one(
    doc: &mut XmlDocument,
    index: &mut TextNodeIndex,
    vt: &VirtualText,
    request: &SlotRequest,
    cursor: &mut usize,
) -> SlotStatus {
    // An empty literal would match everywhere and splice nothing sensible
    if request.original_text.is_empty() {
        warn!(slot = %request.id, "empty original text, treating as not found");
        return SlotStatus::NotFound;
    }

    let haystack = vt.text.as_bytes().get(*cursor..).unwrap_or(&[]);
    let Some(relative) = memmem::find(haystack, request.original_text.as_bytes()) else {
        warn!(
            slot = %request.id,
            cursor = *cursor,
            "original text not found at or after cursor"
        );
        return SlotStatus::NotFound;
    };

    let match_start = *cursor + relative;
    let match_end = match_start + request.original_text.len();

    if request.filled_value == request.original_text {
        debug!(slot = %request.id, at = match_start, "value unchanged, skipping splice");
        *cursor = match_end;
        return SlotStatus::Skipped;
    }

    let escaped = escape_text(&request.filled_value);
    splice_span(doc, index, vt, match_start, match_end, &escaped);
    debug!(
        slot = %request.id,
        at = match_start,
        original_len = request.original_text.len(),
        filled_len = request.filled_value.len(),
        "replaced slot"
    );

    // Advance by the original length: later requests were positioned
    // relative to the pre-edit layout
    *cursor = match_start + request.original_text.len();
    SlotStatus::Replaced
}
