//! Per-document typo lifecycle.
//!
//! [`TypoTracker`] owns the baseline text of every observed document and
//! drives the two stores through open, edit, save and close. Saves are
//! two-phase: [`TypoTracker::begin_save`] diffs against the baseline and hands
//! back an [`AnalysisTicket`], and [`TypoTracker::complete`] applies the
//! source's answer. [`TypoTracker::save`] does both, running the source on the
//! Tokio runtime and collecting completions through
//! [`TypoTracker::poll_events`] or [`TypoTracker::next_event`].
//!
//! Sequence numbers are global and strictly increasing, so a result from
//! before a close can never be mistaken for one belonging to a later open.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use tokio::task::{JoinError, JoinSet};
use typolens_source::{SourceError, TypoSource};
use typolens_types::{DiagnosticsSnapshot, DocumentId, PositionEncoding, Typo, TypoDiagnostic};
use typolens_utils::{compute_diff_stats, find_differences};

use crate::resolver::RangeResolver;
use crate::store::{DiagnosticCollection, TypoStore};

/// Added text above this size is not sent to the source.
pub const DEFAULT_MAX_ANALYSIS_BYTES: usize = 1024 * 1024;

fn default_max_analysis_bytes() -> usize {
    DEFAULT_MAX_ANALYSIS_BYTES
}

/// Tracker settings, read from the `[tracker]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackerConfig {
    #[serde(default)]
    pub position_encoding: PositionEncoding,
    #[serde(default = "default_max_analysis_bytes")]
    pub max_analysis_bytes: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            position_encoding: PositionEncoding::default(),
            max_analysis_bytes: DEFAULT_MAX_ANALYSIS_BYTES,
        }
    }
}

/// Host lifecycle notification.
#[derive(Debug, Clone)]
pub enum DocumentEvent {
    /// Document opened or became the active view.
    Opened { id: DocumentId, text: String },
    /// Buffer edited; `text` is the full new content.
    Changed { id: DocumentId, text: String },
    /// Buffer written to disk with `text`.
    Saved { id: DocumentId, text: String },
    Closed { id: DocumentId },
}

/// One pending analysis, produced by [`TypoTracker::begin_save`].
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    id: DocumentId,
    seq: u64,
    saved_text: String,
    added: String,
}

impl AnalysisTicket {
    #[must_use]
    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    #[must_use]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Added blocks joined with `\n`, each keeping the document's own line
    /// terminators; this is what the source should see.
    #[must_use]
    pub fn added_text(&self) -> &str {
        &self.added
    }

    /// Full document content at save time.
    #[must_use]
    pub fn saved_text(&self) -> &str {
        &self.saved_text
    }
}

/// Result of the synchronous half of a save.
#[derive(Debug, Clone)]
pub enum SaveOutcome {
    /// Nothing was added since the baseline; the baseline moved to the saved text.
    NoNewContent,
    /// Added text exceeded `max_analysis_bytes`; skipped, baseline moved.
    TooLarge { bytes: usize },
    /// Run the source over the ticket's added text, then call
    /// [`TypoTracker::complete`].
    Analyze(AnalysisTicket),
}

/// What [`TypoTracker::complete`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// Typo Store replaced with `typos` entries.
    Applied { typos: usize },
    /// Source failed; prior typos kept.
    Failed,
    /// A same-or-newer result was already applied; discarded.
    Stale,
    /// Document was closed while the analysis ran; discarded.
    DocumentClosed,
}

/// A background analysis that [`TypoTracker::poll_events`] or
/// [`TypoTracker::next_event`] has applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisCompletion {
    pub id: DocumentId,
    pub seq: u64,
    pub outcome: AnalysisOutcome,
}

#[derive(Debug)]
struct TrackedDocument {
    /// Latest text seen from any event; ranges are resolved against this.
    current: String,
    /// Diff baseline for the next save.
    snapshot: String,
    /// Sequence of the save that set `snapshot`.
    snapshot_seq: u64,
    /// Sequence of the last applied analysis.
    typos_seq: u64,
}

struct AnalysisEvent {
    ticket: AnalysisTicket,
    result: Result<Vec<Typo>, SourceError>,
}

/// Typo lifecycle controller.
///
/// Driven through `&mut self` by a single host loop. The only work that runs
/// elsewhere is the source call spawned by [`TypoTracker::save`].
pub struct TypoTracker {
    source: Arc<dyn TypoSource>,
    resolver: RangeResolver,
    max_analysis_bytes: usize,
    typos: TypoStore,
    diagnostics: DiagnosticCollection,
    documents: HashMap<DocumentId, TrackedDocument>,
    next_seq: u64,
    analyses: JoinSet<AnalysisEvent>,
}

impl std::fmt::Debug for TypoTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypoTracker")
            .field("source", &self.source.name())
            .field("resolver", &self.resolver)
            .field("documents", &self.documents.len())
            .field("in_flight", &self.analyses.len())
            .finish_non_exhaustive()
    }
}

impl TypoTracker {
    #[must_use]
    pub fn new(
        source: Arc<dyn TypoSource>,
        typos: TypoStore,
        diagnostics: DiagnosticCollection,
        config: &TrackerConfig,
    ) -> Self {
        Self {
            source,
            resolver: RangeResolver::new(config.position_encoding),
            max_analysis_bytes: config.max_analysis_bytes,
            typos,
            diagnostics,
            documents: HashMap::new(),
            next_seq: 0,
            analyses: JoinSet::new(),
        }
    }

    /// Tracker with empty stores.
    #[must_use]
    pub fn with_source(source: Arc<dyn TypoSource>, config: &TrackerConfig) -> Self {
        Self::new(source, TypoStore::new(), DiagnosticCollection::new(), config)
    }

    fn allocate_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Start tracking `id` with `baseline` unless it already is.
    ///
    /// A new record treats every sequence up to `epoch` as already applied,
    /// so tickets issued before it are stale.
    fn track(&mut self, id: &DocumentId, baseline: &str, epoch: u64) -> &mut TrackedDocument {
        self.documents.entry(id.clone()).or_insert_with(|| {
            tracing::debug!(uri = %id, epoch, "Tracking document");
            TrackedDocument {
                current: baseline.to_string(),
                snapshot: baseline.to_string(),
                snapshot_seq: epoch,
                typos_seq: epoch,
            }
        })
    }

    /// Re-resolve `id`'s stored typos against its current text.
    fn refresh(&mut self, id: &DocumentId) {
        let Some(doc) = self.documents.get(id) else {
            return;
        };
        let typos = self.typos.get(id).map_or(&[][..], Vec::as_slice);
        let diagnostics = self.resolver.resolve(&doc.current, typos);
        self.diagnostics.set(id.clone(), diagnostics);
    }

    /// Document opened or became active.
    pub fn open(&mut self, id: &DocumentId, text: &str) {
        let epoch = self.next_seq;
        self.track(id, text, epoch).current = text.to_string();
        self.refresh(id);
    }

    /// Buffer edited. Never calls the source.
    pub fn change(&mut self, id: &DocumentId, text: &str) {
        let epoch = self.next_seq;
        self.track(id, text, epoch).current = text.to_string();
        self.refresh(id);
    }

    /// Synchronous half of a save: diff against the baseline and decide
    /// whether the source needs to run.
    pub fn begin_save(&mut self, id: &DocumentId, text: &str) -> SaveOutcome {
        let seq = self.allocate_seq();
        let max_bytes = self.max_analysis_bytes;
        let doc = self.track(id, "", seq - 1);
        doc.current = text.to_string();

        let blocks = find_differences(&doc.snapshot, text);
        let (added_lines, removed_lines) = compute_diff_stats(&doc.snapshot, text);
        tracing::debug!(
            uri = %id,
            seq,
            blocks = blocks.len(),
            added_lines,
            removed_lines,
            "Save diffed against baseline"
        );

        let outcome = if blocks.is_empty() {
            doc.snapshot = text.to_string();
            doc.snapshot_seq = seq;
            SaveOutcome::NoNewContent
        } else {
            let added = blocks.join("\n");
            if added.len() > max_bytes {
                tracing::warn!(
                    uri = %id,
                    bytes = added.len(),
                    limit = max_bytes,
                    "Skipping analysis of oversized change"
                );
                doc.snapshot = text.to_string();
                doc.snapshot_seq = seq;
                SaveOutcome::TooLarge { bytes: added.len() }
            } else {
                SaveOutcome::Analyze(AnalysisTicket {
                    id: id.clone(),
                    seq,
                    saved_text: text.to_string(),
                    added,
                })
            }
        };

        self.refresh(id);
        outcome
    }

    /// Apply the source's answer for `ticket`.
    pub fn complete(
        &mut self,
        ticket: &AnalysisTicket,
        result: Result<Vec<Typo>, SourceError>,
    ) -> AnalysisOutcome {
        let id = ticket.id();
        let Some(doc) = self.documents.get_mut(id) else {
            tracing::debug!(uri = %id, seq = ticket.seq, "Dropping result for closed document");
            return AnalysisOutcome::DocumentClosed;
        };
        if ticket.seq <= doc.typos_seq {
            tracing::debug!(
                uri = %id,
                seq = ticket.seq,
                applied = doc.typos_seq,
                "Dropping stale analysis result"
            );
            return AnalysisOutcome::Stale;
        }
        if ticket.seq > doc.snapshot_seq {
            doc.snapshot.clone_from(&ticket.saved_text);
            doc.snapshot_seq = ticket.seq;
        }

        let outcome = match result {
            Ok(typos) => {
                doc.typos_seq = ticket.seq;
                let count = typos.len();
                tracing::debug!(uri = %id, seq = ticket.seq, typos = count, "Analysis applied");
                self.typos
                    .set(id.clone(), typos.into_iter().map(Arc::new).collect());
                AnalysisOutcome::Applied { typos: count }
            }
            Err(e) => {
                tracing::warn!(
                    uri = %id,
                    seq = ticket.seq,
                    source = self.source.name(),
                    "Typo analysis failed: {e}"
                );
                AnalysisOutcome::Failed
            }
        };

        self.refresh(id);
        outcome
    }

    /// Save with the source call spawned on the current Tokio runtime.
    ///
    /// Returns the sequence number of the dispatched analysis, or `None` if
    /// the save needed none. Must be called from within a Tokio runtime.
    pub fn save(&mut self, id: &DocumentId, text: &str) -> Option<u64> {
        let SaveOutcome::Analyze(ticket) = self.begin_save(id, text) else {
            return None;
        };
        let seq = ticket.seq;
        let source = Arc::clone(&self.source);
        self.analyses.spawn(async move {
            let result = source.analyze(ticket.added_text()).await;
            AnalysisEvent { ticket, result }
        });
        Some(seq)
    }

    /// Apply up to `budget` finished analyses without waiting.
    ///
    /// Returns the number of completions processed.
    pub fn poll_events(&mut self, budget: usize) -> usize {
        let mut count = 0;
        while count < budget {
            match self.analyses.try_join_next() {
                Some(joined) => {
                    self.handle_joined(joined);
                    count += 1;
                }
                None => break,
            }
        }
        count
    }

    /// Wait for the next in-flight analysis and apply it.
    ///
    /// Returns `None` once nothing is in flight.
    pub async fn next_event(&mut self) -> Option<AnalysisCompletion> {
        while let Some(joined) = self.analyses.join_next().await {
            if let Some(completion) = self.handle_joined(joined) {
                return Some(completion);
            }
        }
        None
    }

    fn handle_joined(
        &mut self,
        joined: Result<AnalysisEvent, JoinError>,
    ) -> Option<AnalysisCompletion> {
        match joined {
            Ok(AnalysisEvent { ticket, result }) => {
                let outcome = self.complete(&ticket, result);
                Some(AnalysisCompletion {
                    id: ticket.id,
                    seq: ticket.seq,
                    outcome,
                })
            }
            Err(e) if e.is_panic() => {
                tracing::error!(source = self.source.name(), "Typo analysis task panicked");
                None
            }
            Err(e) => {
                tracing::debug!(?e, "Typo analysis task cancelled");
                None
            }
        }
    }

    /// Number of spawned analyses not yet applied.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.analyses.len()
    }

    /// Forget `id` entirely. Later results for it are discarded.
    pub fn close(&mut self, id: &DocumentId) {
        if self.documents.remove(id).is_some() {
            tracing::debug!(uri = %id, "Document closed");
        }
        self.typos.delete(id);
        self.diagnostics.delete(id);
    }

    /// Dispatch a host event. Saves go through [`TypoTracker::save`].
    pub fn handle_event(&mut self, event: DocumentEvent) {
        match event {
            DocumentEvent::Opened { id, text } => self.open(&id, &text),
            DocumentEvent::Changed { id, text } => self.change(&id, &text),
            DocumentEvent::Saved { id, text } => {
                self.save(&id, &text);
            }
            DocumentEvent::Closed { id } => self.close(&id),
        }
    }

    /// Tear down every store, record and in-flight analysis.
    pub fn dispose_all(&mut self) {
        // Dropping the set aborts its tasks.
        self.analyses = JoinSet::new();
        self.documents.clear();
        self.typos.dispose_all();
        self.diagnostics.dispose_all();
    }

    #[must_use]
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    #[must_use]
    pub fn typos(&self) -> &TypoStore {
        &self.typos
    }

    #[must_use]
    pub fn diagnostics_for(&self, id: &DocumentId) -> Option<&[TypoDiagnostic]> {
        self.diagnostics.get(id).map(Vec::as_slice)
    }

    #[must_use]
    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        self.diagnostics.snapshot()
    }

    #[must_use]
    pub fn is_tracked(&self, id: &DocumentId) -> bool {
        self.documents.contains_key(id)
    }

    /// Current diff baseline for `id`.
    #[must_use]
    pub fn baseline(&self, id: &DocumentId) -> Option<&str> {
        self.documents.get(id).map(|doc| doc.snapshot.as_str())
    }
}
