//! Generic adapter for any command that reports typos as JSON.
//!
//! The command receives the text on stdin and must print a JSON array of
//! typo records (`[{"token": "teh", "suggestions": ["the"], "info": "..."}]`)
//! and exit successfully.

use std::time::Duration;

use typolens_types::Typo;

use crate::process::run_with_input;
use crate::{AnalysisFut, SourceError, TypoSource};

#[derive(Debug, Clone)]
pub struct CommandSource {
    command: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandSource {
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
        let output = run_with_input(&self.command, &self.args, text, self.timeout).await?;
        if !output.status.success() {
            return Err(SourceError::Exit {
                command: self.command.clone(),
                status: output.status.to_string(),
                stderr: output.stderr.trim().to_string(),
            });
        }
        parse_typo_json(&self.command, &output.stdout)
    }
}

impl TypoSource for CommandSource {
    fn name(&self) -> &str {
        &self.command
    }

    fn analyze<'a>(&'a self, text: &'a str) -> AnalysisFut<'a> {
        Box::pin(self.run(text))
    }
}

/// Blank output means "nothing found".
pub(crate) fn parse_typo_json(origin: &str, stdout: &str) -> Result<Vec<Typo>, SourceError> {
    let body = stdout.trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(body).map_err(|e| SourceError::Malformed {
        origin: origin.to_string(),
        reason: e.to_string(),
    })
}
