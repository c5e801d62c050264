//! Incremental typo tracking.
//!
//! Only text added since a document's last save is sent to a typo source;
//! the typos found are then located everywhere in the current text and kept
//! in sync with edits until the next save replaces them.

mod resolver;
mod store;
mod tracker;

pub use resolver::{RangeResolver, resolve_ranges};
pub use store::{DiagnosticCollection, DocumentStore, TypoStore};
pub use tracker::{
    AnalysisCompletion, AnalysisOutcome, AnalysisTicket, DEFAULT_MAX_ANALYSIS_BYTES, DocumentEvent,
    SaveOutcome, TrackerConfig, TypoTracker,
};
pub use typolens_utils::find_differences;
