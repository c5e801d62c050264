//! Per-document state containers.
//!
//! [`TypoStore`] holds the latest analysis result for each document and
//! [`DiagnosticCollection`] holds what the renderer shows. Both are keyed by
//! [`DocumentId`], never by view, so switching editors on the same document
//! neither loses nor duplicates state.

use std::collections::HashMap;
use std::sync::Arc;

use typolens_types::{DiagnosticsSnapshot, DocumentId, Typo, TypoDiagnostic};

/// Map from document identity to a wholly-replaced value.
///
/// A missing entry and an entry holding an empty value are different states:
/// "never computed" versus "computed, nothing found".
#[derive(Debug, Clone)]
pub struct DocumentStore<V> {
    data: HashMap<DocumentId, V>,
}

impl<V> Default for DocumentStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> DocumentStore<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    /// Replace whatever `id` held.
    pub fn set(&mut self, id: DocumentId, value: V) {
        self.data.insert(id, value);
    }

    #[must_use]
    pub fn get(&self, id: &DocumentId) -> Option<&V> {
        self.data.get(id)
    }

    pub fn delete(&mut self, id: &DocumentId) -> Option<V> {
        self.data.remove(id)
    }

    #[must_use]
    pub fn contains(&self, id: &DocumentId) -> bool {
        self.data.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Drop every entry.
    pub fn dispose_all(&mut self) {
        self.data.clear();
    }
}

/// Latest typo analysis per document.
pub type TypoStore = DocumentStore<Vec<Arc<Typo>>>;

/// Rendered diagnostics per document.
pub type DiagnosticCollection = DocumentStore<Vec<TypoDiagnostic>>;

impl DocumentStore<Vec<TypoDiagnostic>> {
    /// Immutable view of every document's diagnostics.
    #[must_use]
    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        let mut documents: Vec<(DocumentId, Vec<TypoDiagnostic>)> = self
            .data
            .iter()
            .map(|(id, items)| (id.clone(), items.clone()))
            .collect();

        // Sort: documents with errors first, then by URI
        documents.sort_by(|a, b| {
            let a_has_errors = a.1.iter().any(|d| d.severity().is_error());
            let b_has_errors = b.1.iter().any(|d| d.severity().is_error());
            b_has_errors.cmp(&a_has_errors).then_with(|| a.0.cmp(&b.0))
        });

        DiagnosticsSnapshot::new(documents)
    }
}
