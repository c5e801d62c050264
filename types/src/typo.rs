//! Flagged tokens as reported by a typo source.

use serde::{Deserialize, Serialize};

/// Severity level for a typo diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypoSeverity {
    Error = 1,
    Warning = 2,
    #[serde(alias = "info")]
    Information = 3,
    Hint = 4,
}

impl TypoSeverity {
    #[must_use]
    pub fn is_error(self) -> bool {
        self == Self::Error
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Information => "info",
            Self::Hint => "hint",
        }
    }
}

/// A token flagged by analysis, independent of where it occurs.
///
/// Immutable once built. The JSON shape (`token`, `suggestions`, `info`,
/// `severity`, `isCommon`) is what external command sources emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typo {
    token: String,
    #[serde(default)]
    suggestions: Vec<String>,
    #[serde(default)]
    info: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    severity: Option<TypoSeverity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_common: Option<bool>,
}

impl Typo {
    #[must_use]
    pub fn new(token: impl Into<String>, suggestions: Vec<String>, info: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            suggestions,
            info: info.into(),
            severity: None,
            is_common: None,
        }
    }

    pub fn with_severity(mut self, severity: TypoSeverity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_common(mut self, is_common: bool) -> Self {
        self.is_common = Some(is_common);
        self
    }

    /// Exact text to locate. May contain newlines.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    #[must_use]
    pub fn info(&self) -> &str {
        &self.info
    }

    /// Explicit severity override, if the source supplied one.
    #[must_use]
    pub fn severity(&self) -> Option<TypoSeverity> {
        self.severity
    }

    #[must_use]
    pub fn is_common(&self) -> Option<bool> {
        self.is_common
    }

    /// Severity used for rendering.
    ///
    /// An explicit override wins. Otherwise uncommon typos (`is_common ==
    /// Some(false)`) are informational and everything else is a warning.
    #[must_use]
    pub fn effective_severity(&self) -> TypoSeverity {
        match (self.severity, self.is_common) {
            (Some(severity), _) => severity,
            (None, Some(false)) => TypoSeverity::Information,
            (None, Some(true) | None) => TypoSeverity::Warning,
        }
    }
}
