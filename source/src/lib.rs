//! Typo sources consumed by the tracker.
//!
//! A [`TypoSource`] turns a block of text into [`Typo`] records. The tracker
//! only ever sees the trait; the adapters here (codespell, an arbitrary JSON
//! command, an in-process dictionary) are selected through [`SourceConfig`].

mod codespell;
mod command;
mod config;
mod dictionary;
mod process;

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use typolens_types::Typo;

pub use codespell::CodespellSource;
pub use command::CommandSource;
pub use config::{SourceConfig, SourceKind};
pub use dictionary::DictionarySource;

/// Analysis future type alias.
pub type AnalysisFut<'a> = Pin<Box<dyn Future<Output = Result<Vec<Typo>, SourceError>> + Send + 'a>>;

/// External capability that flags tokens in text.
pub trait TypoSource: Send + Sync {
    /// Short name for logs (e.g. "codespell").
    fn name(&self) -> &str;

    /// Analyze `text` and return the typos found in it.
    fn analyze<'a>(&'a self, text: &'a str) -> AnalysisFut<'a>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("{command} not found in PATH")]
    NotFound {
        command: String,
        #[source]
        source: which::Error,
    },
    #[error("spawning {command}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O with {command}: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{command} timed out after {}s", timeout.as_secs())]
    Timeout { command: String, timeout: Duration },
    #[error("{command} exited with {status}: {stderr}")]
    Exit {
        command: String,
        status: String,
        stderr: String,
    },
    #[error("malformed output from {origin}: {reason}")]
    Malformed { origin: String, reason: String },
    #[error("reading dictionary {}", path.display())]
    Dictionary {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("source misconfigured: {0}")]
    Misconfigured(String),
}

/// Build the source described by `config`.
pub fn build_source(config: &SourceConfig) -> Result<Arc<dyn TypoSource>, SourceError> {
    let timeout = config.timeout_secs.map(Duration::from_secs);
    let source: Arc<dyn TypoSource> = match config.kind {
        SourceKind::Codespell => {
            let command = config.command.as_deref().unwrap_or(CodespellSource::DEFAULT_COMMAND);
            Arc::new(CodespellSource::new(command, config.args.clone()).with_timeout(timeout))
        }
        SourceKind::Command => {
            let Some(command) = config.command.as_deref() else {
                return Err(SourceError::Misconfigured(
                    "kind = \"command\" requires `command`".to_string(),
                ));
            };
            Arc::new(CommandSource::new(command, config.args.clone()).with_timeout(timeout))
        }
        SourceKind::Dictionary => {
            if config.dictionary.is_none() && config.words.is_empty() {
                return Err(SourceError::Misconfigured(
                    "kind = \"dictionary\" requires `dictionary` or `words`".to_string(),
                ));
            }
            let mut dictionary = match &config.dictionary {
                Some(path) => DictionarySource::load(path)?,
                None => DictionarySource::new(),
            };
            for (wrong, fixes) in &config.words {
                dictionary.insert_line(wrong, fixes);
            }
            Arc::new(dictionary)
        }
    };
    tracing::info!(source = source.name(), "Typo source ready");
    Ok(source)
}
