//! Located typo occurrences and read-only views over them.
//!
//! A [`TypoDiagnostic`] is derived state: it is rebuilt from the document's
//! typo set and current text on every refresh and never patched in place.

use std::ops::Range;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::ids::DocumentId;
use crate::position::TextRange;
use crate::typo::{Typo, TypoSeverity};

/// Tag shared by every diagnostic this crate family produces. Renderers match
/// on it to attach quick fixes.
pub const DIAGNOSTIC_CODE: &str = "codespell";

/// One occurrence of a [`Typo`] in a document's current text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypoDiagnostic {
    range: TextRange,
    /// Byte offsets of the occurrence.
    offsets: Range<usize>,
    severity: TypoSeverity,
    message: String,
    code: &'static str,
    typo: Arc<Typo>,
}

impl TypoDiagnostic {
    /// Locate `typo` at `offsets`, whose line/column form is `range`.
    #[must_use]
    pub fn new(typo: Arc<Typo>, offsets: Range<usize>, range: TextRange) -> Self {
        Self {
            range,
            offsets,
            severity: typo.effective_severity(),
            message: typo.info().to_string(),
            code: DIAGNOSTIC_CODE,
            typo,
        }
    }

    #[must_use]
    pub fn range(&self) -> TextRange {
        self.range
    }

    #[must_use]
    pub fn offsets(&self) -> Range<usize> {
        self.offsets.clone()
    }

    #[must_use]
    pub fn severity(&self) -> TypoSeverity {
        self.severity
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// The typo this occurrence was resolved from.
    #[must_use]
    pub fn typo(&self) -> &Arc<Typo> {
        &self.typo
    }

    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        self.typo.suggestions()
    }

    /// Format as `path:line:col: severity: [code] message` (1-indexed for display).
    #[must_use]
    pub fn display_with_path(&self, path: &Path) -> String {
        let mut out = format!(
            "{}:{}:{}: {}: [{}] {}",
            path.display(),
            self.range.start.line + 1,
            self.range.start.character + 1,
            self.severity.label(),
            self.code,
            self.message,
        );
        if !self.suggestions().is_empty() {
            out.push_str(&format!(" (did you mean: {})", self.suggestions().join(", ")));
        }
        out
    }
}

/// Immutable snapshot of all diagnostics, suitable for rendering.
///
/// Counts are computed from `documents` on demand.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsSnapshot {
    /// Per-document diagnostics, sorted with error-containing documents first.
    documents: Vec<(DocumentId, Vec<TypoDiagnostic>)>,
}

impl DiagnosticsSnapshot {
    /// Construct a snapshot from already-sorted per-document diagnostics.
    #[must_use]
    pub fn new(documents: Vec<(DocumentId, Vec<TypoDiagnostic>)>) -> Self {
        Self { documents }
    }

    #[must_use]
    pub fn documents(&self) -> &[(DocumentId, Vec<TypoDiagnostic>)] {
        &self.documents
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }

    fn count_by_severity(&self, severity: TypoSeverity) -> usize {
        self.documents
            .iter()
            .flat_map(|(_, items)| items)
            .filter(|d| d.severity() == severity)
            .count()
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count_by_severity(TypoSeverity::Error)
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count_by_severity(TypoSeverity::Warning)
    }

    #[must_use]
    pub fn info_count(&self) -> usize {
        self.count_by_severity(TypoSeverity::Information)
    }

    #[must_use]
    pub fn hint_count(&self) -> usize {
        self.count_by_severity(TypoSeverity::Hint)
    }

    #[must_use]
    pub fn total_count(&self) -> usize {
        self.documents.iter().map(|(_, items)| items.len()).sum()
    }

    /// Format a compact status string like "E:3 W:5".
    #[must_use]
    pub fn status_string(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        format!("E:{} W:{}", self.error_count(), self.warning_count())
    }
}
