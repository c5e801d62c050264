//! In-process typo source backed by a codespell-format word list.
//!
//! Each line is `wrong->right`. The right-hand side follows codespell:
//! a single fix (`teh->the`), a candidate list ending in a comma
//! (`adn->and, add,`), or candidates followed by a reason
//! (`clas->class, disabled because of name clash`). `#` lines are comments.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use typolens_types::Typo;

use crate::{AnalysisFut, SourceError, TypoSource};

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{L}[\p{L}\p{M}']*").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    fixes: Vec<String>,
    reason: Option<String>,
}

impl Entry {
    fn parse(rhs: &str) -> Self {
        let data = rhs.trim();
        match data.rfind(',') {
            None => Self {
                fixes: split_fixes(data),
                reason: None,
            },
            Some(idx) if idx == data.len() - 1 => Self {
                fixes: split_fixes(&data[..idx]),
                reason: None,
            },
            Some(idx) => Self {
                fixes: split_fixes(&data[..idx]),
                reason: Some(data[idx + 1..].trim().to_string()),
            },
        }
    }
}

fn split_fixes(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Match the casing of `token` (`Teh` → `The`, `TEH` → `THE`).
fn match_case(token: &str, fix: &str) -> String {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return fix.to_string();
    };
    let rest_upper = chars.clone().count() > 0 && chars.all(char::is_uppercase);
    if first.is_uppercase() && rest_upper {
        fix.to_uppercase()
    } else if first.is_uppercase() {
        let mut fixed = fix.chars();
        match fixed.next() {
            Some(c) => c.to_uppercase().chain(fixed).collect(),
            None => String::new(),
        }
    } else {
        fix.to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DictionarySource {
    /// Keyed by lowercase misspelling.
    entries: HashMap<String, Entry>,
}

impl DictionarySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse dictionary text. Malformed lines are skipped.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut dictionary = Self::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once("->") {
                Some((wrong, rhs)) => dictionary.insert_line(wrong, rhs),
                None => tracing::debug!(line = lineno + 1, "Skipping malformed dictionary line"),
            }
        }
        dictionary
    }

    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let text = std::fs::read_to_string(path).map_err(|source| SourceError::Dictionary {
            path: path.to_path_buf(),
            source,
        })?;
        let dictionary = Self::parse(&text);
        tracing::debug!(path = %path.display(), entries = dictionary.len(), "Loaded dictionary");
        Ok(dictionary)
    }

    /// Add one entry, with `rhs` in dictionary right-hand-side form.
    pub fn insert_line(&mut self, wrong: &str, rhs: &str) {
        let wrong = wrong.trim().to_lowercase();
        if wrong.is_empty() {
            return;
        }
        self.entries.insert(wrong, Entry::parse(rhs));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Typos in `text`, one per distinct token, in order of first appearance.
    #[must_use]
    pub fn check(&self, text: &str) -> Vec<Typo> {
        let mut seen = HashSet::new();
        let mut typos = Vec::new();
        for m in WORD.find_iter(text) {
            let token = m.as_str().trim_end_matches('\'');
            if !seen.insert(token) {
                continue;
            }
            let Some(entry) = self.entries.get(&token.to_lowercase()) else {
                continue;
            };
            let suggestions: Vec<String> =
                entry.fixes.iter().map(|fix| match_case(token, fix)).collect();
            let info = match &entry.reason {
                Some(reason) => format!("\"{token}\" may be misspelled: {reason}"),
                None => format!("\"{token}\" may be misspelled"),
            };
            typos.push(Typo::new(token, suggestions, info).with_common(true));
        }
        typos
    }
}

impl TypoSource for DictionarySource {
    fn name(&self) -> &str {
        "dictionary"
    }

    fn analyze<'a>(&'a self, text: &'a str) -> AnalysisFut<'a> {
        Box::pin(std::future::ready(Ok(self.check(text))))
    }
}
