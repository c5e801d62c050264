//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;
use typolens_core::{TrackerConfig, TypoTracker};
use typolens_source::{AnalysisFut, DictionarySource, SourceError, TypoSource};
use typolens_types::{DocumentId, Typo};

type Reply = Result<Vec<Typo>, SourceError>;

/// Source whose answers are released by the test, keyed by the exact text
/// it is asked to analyze. Unscripted text yields no typos.
#[derive(Default)]
pub struct ScriptedSource {
    replies: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Hold the analysis of `text` until the returned sender fires.
    pub fn expect(&self, text: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.replies.lock().unwrap().insert(text.to_string(), rx);
        tx
    }

    /// Every text analyzed so far, in call order.
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl TypoSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    fn analyze<'a>(&'a self, text: &'a str) -> AnalysisFut<'a> {
        Box::pin(async move {
            self.seen.lock().unwrap().push(text.to_string());
            let reply = self.replies.lock().unwrap().remove(text);
            match reply {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(SourceError::Misconfigured("reply dropped".into()))),
                None => Ok(Vec::new()),
            }
        })
    }
}

/// In-process dictionary flagging a few common misspellings.
pub fn dictionary() -> Arc<DictionarySource> {
    Arc::new(DictionarySource::parse(
        "teh->the\nadn->and\nrecieve->receive\nseperate->separate\n",
    ))
}

pub fn tracker_with(source: Arc<dyn TypoSource>) -> TypoTracker {
    TypoTracker::with_source(source, &TrackerConfig::default())
}

pub fn doc(name: &str) -> DocumentId {
    DocumentId::parse(&format!("file:///work/{name}")).unwrap()
}

pub fn typo(token: &str) -> Typo {
    Typo::new(token, vec![], format!("\"{token}\" may be misspelled"))
}

/// Tokens of every diagnostic currently shown for `id`.
pub fn shown(tracker: &TypoTracker, id: &DocumentId) -> Vec<String> {
    tracker
        .diagnostics_for(id)
        .unwrap_or_default()
        .iter()
        .map(|d| d.typo().token().to_string())
        .collect()
}
