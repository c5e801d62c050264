use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Which adapter produces typos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The `codespell` CLI reading from stdin.
    #[default]
    Codespell,
    /// Any command that reads text on stdin and prints a JSON array of typos.
    Command,
    /// In-process lookup in a codespell-format word list.
    Dictionary,
}

/// Configuration for the typo source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,
    /// Executable for `codespell` / `command` kinds. Default for codespell: "codespell".
    #[serde(default)]
    pub command: Option<String>,
    /// Extra arguments passed before the stdin marker.
    #[serde(default)]
    pub args: Vec<String>,
    /// Kill the child process after this many seconds. Default: no limit.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Path to a codespell-format dictionary (`wrong->right`).
    #[serde(default)]
    pub dictionary: Option<PathBuf>,
    /// Inline dictionary entries; values use the right-hand side of the
    /// dictionary format (e.g. `"the"` or `"then, than,"`).
    #[serde(default)]
    pub words: BTreeMap<String, String>,
}
