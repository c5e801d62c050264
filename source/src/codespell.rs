//! `codespell` CLI adapter.

use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use typolens_types::Typo;

use crate::process::run_with_input;
use crate::{AnalysisFut, SourceError, TypoSource};

/// codespell's exit status when misspellings were found (`EX_DATAERR`).
const EXIT_TYPOS_FOUND: i32 = 65;

/// `\tteh ==> the` as printed for stdin input.
static STDIN_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\t(?P<word>.+?) ==> (?P<fix>.+)$").expect("valid regex"));

/// `path:12: teh ==> the` as printed for file input.
static FILE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.+?:\d+: (?P<word>.+?) ==> (?P<fix>.+)$").expect("valid regex")
});

/// Runs `codespell [args] -` with the text on stdin.
#[derive(Debug, Clone)]
pub struct CodespellSource {
    command: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl CodespellSource {
    pub const DEFAULT_COMMAND: &'static str = "codespell";

    #[must_use]
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, text: &str) -> Result<Vec<Typo>, SourceError> {
        let mut args = self.args.clone();
        args.push("-".to_string());
        let output = run_with_input(&self.command, &args, text, self.timeout).await?;

        match output.status.code() {
            Some(0 | EXIT_TYPOS_FOUND) => Ok(parse_codespell_output(&output.stdout)),
            _ => Err(SourceError::Exit {
                command: self.command.clone(),
                status: output.status.to_string(),
                stderr: output.stderr.trim().to_string(),
            }),
        }
    }
}

impl Default for CodespellSource {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COMMAND, Vec::new())
    }
}

impl TypoSource for CodespellSource {
    fn name(&self) -> &str {
        "codespell"
    }

    fn analyze<'a>(&'a self, text: &'a str) -> AnalysisFut<'a> {
        Box::pin(self.run(text))
    }
}

/// Parse codespell's report into typos, one per distinct token.
///
/// Context lines (`3: the offending line`) are ignored; only correction
/// lines are read. Each token is reported once since every occurrence is
/// located later against the full document.
pub(crate) fn parse_codespell_output(stdout: &str) -> Vec<Typo> {
    let mut seen = HashSet::new();
    let mut typos = Vec::new();

    for line in stdout.lines() {
        let Some(caps) = STDIN_LINE
            .captures(line)
            .or_else(|| FILE_LINE.captures(line))
        else {
            continue;
        };
        let word = caps["word"].trim();
        if word.is_empty() || !seen.insert(word.to_string()) {
            continue;
        }

        let (fixes, reason) = match caps["fix"].split_once(" | ") {
            Some((fixes, reason)) => (fixes, Some(reason.trim())),
            None => (caps["fix"].trim_end(), None),
        };
        let suggestions: Vec<String> = fixes
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        let info = match reason {
            Some(reason) => format!("\"{word}\" may be misspelled: {reason}"),
            None => format!("\"{word}\" may be misspelled"),
        };
        typos.push(Typo::new(word, suggestions, info));
    }

    typos
}
