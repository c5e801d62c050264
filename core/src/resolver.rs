//! Locates typo tokens in a document's current text.

use std::sync::Arc;

use regex::{Regex, RegexBuilder};
use typolens_types::{LineIndex, PositionEncoding, Typo, TypoDiagnostic};

/// Compiled size ceiling for a single token's pattern.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Build a pattern matching `token` verbatim.
///
/// Every metacharacter is escaped; multi-line mode keeps line anchors from
/// ever applying, so a token containing `\n` matches across lines.
fn literal_pattern(token: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(token))
        .multi_line(true)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
}

/// Resolve every occurrence of every typo in `text`.
///
/// Output is grouped by typo (in input order) and ordered by offset within
/// each typo. Tokens that no longer occur produce nothing.
#[must_use]
pub fn resolve_ranges(
    text: &str,
    typos: &[Arc<Typo>],
    encoding: PositionEncoding,
) -> Vec<TypoDiagnostic> {
    let index = LineIndex::new(text);
    let mut diagnostics = Vec::new();

    for typo in typos {
        if typo.token().is_empty() {
            continue;
        }
        let pattern = match literal_pattern(typo.token()) {
            Ok(pattern) => pattern,
            Err(e) => {
                tracing::warn!(token = typo.token(), "Skipping typo with unusable pattern: {e}");
                continue;
            }
        };
        for m in pattern.find_iter(text) {
            let range = index.range(m.range(), encoding);
            diagnostics.push(TypoDiagnostic::new(Arc::clone(typo), m.range(), range));
        }
    }

    diagnostics
}

/// [`resolve_ranges`] with a fixed position encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeResolver {
    encoding: PositionEncoding,
}

impl RangeResolver {
    #[must_use]
    pub fn new(encoding: PositionEncoding) -> Self {
        Self { encoding }
    }

    #[must_use]
    pub fn resolve(&self, text: &str, typos: &[Arc<Typo>]) -> Vec<TypoDiagnostic> {
        resolve_ranges(text, typos, self.encoding)
    }
}
