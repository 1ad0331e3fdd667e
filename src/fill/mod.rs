//! Slot filling: the replacement engine and its mutation primitive

pub mod engine;
pub mod splice;

pub use engine::{apply_requests, FillCounts, SlotOutcome, SlotRequest, SlotStatus};

/// Tuning knobs for a fill pass
#[derive(Debug, Clone)]
pub struct FillOptions {
    /// Qualified names of the elements whose text leaves carry run text
    pub run_text_tags: Vec<String>,
    /// Scan relationship references after editing and report orphans
    pub validate_relationships: bool,
}

impl Default for FillOptions {
    fn default() -> Self {
        FillOptions {
            run_text_tags: vec!["w:t".to_string()],
            validate_relationships: true,
        }
    }
}

/// Everything a caller learns from one fill pass
#[derive(Debug)]
pub struct FillReport {
    /// The rebuilt package bytes
    pub bytes: Vec<u8>,
    /// Aggregate counts for the pass
    pub counts: FillCounts,
    /// Per-request outcomes, in request order
    pub outcomes: Vec<SlotOutcome>,
    /// Relationship ids referenced by the edited document part but absent
    /// from its relationship table (advisory only)
    pub orphaned_relationships: Vec<String>,
}
