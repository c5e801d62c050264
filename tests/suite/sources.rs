//! Process-backed sources end to end, using `sh` as a stand-in program.

#![cfg(unix)]

use std::sync::Arc;

use typolens_core::AnalysisOutcome;
use typolens_source::{CodespellSource, CommandSource, TypoSource};

use crate::common::{doc, shown, tracker_with};

fn sh(script: &str) -> Vec<String> {
    vec!["-c".to_string(), script.to_string()]
}

#[tokio::test]
async fn codespell_report_becomes_diagnostics() {
    // codespell prints corrections for stdin input and exits 65 when it finds any.
    let source = CodespellSource::new(
        "sh",
        sh("cat >/dev/null; printf '1: teh line\\n\\tteh ==> the, ten\\n'; exit 65"),
    );
    let mut tracker = tracker_with(Arc::new(source));
    let id = doc("a.txt");
    tracker.open(&id, "");
    tracker.save(&id, "teh line\n");

    let completion = tracker.next_event().await.unwrap();
    assert_eq!(completion.outcome, AnalysisOutcome::Applied { typos: 1 });
    let diags = tracker.diagnostics_for(&id).unwrap();
    assert_eq!(diags[0].suggestions(), ["the", "ten"]);
}

#[tokio::test]
async fn codespell_crash_is_a_failed_analysis() {
    let source = CodespellSource::new("sh", sh("cat >/dev/null; echo broken >&2; exit 2"));
    let mut tracker = tracker_with(Arc::new(source));
    let id = doc("a.txt");
    tracker.open(&id, "");
    tracker.save(&id, "teh\n");

    let completion = tracker.next_event().await.unwrap();
    assert_eq!(completion.outcome, AnalysisOutcome::Failed);
    assert!(shown(&tracker, &id).is_empty());
}

#[tokio::test]
async fn command_source_reads_json() {
    let source = CommandSource::new(
        "sh",
        sh(r#"cat >/dev/null; echo '[{"token": "seperate", "suggestions": ["separate"], "info": "bad"}]'"#),
    );
    let typos = source.analyze("a seperate line").await.unwrap();
    assert_eq!(typos.len(), 1);
    assert_eq!(typos[0].token(), "seperate");
    assert_eq!(typos[0].info(), "bad");
}

#[tokio::test]
async fn command_source_rejects_garbage() {
    let source = CommandSource::new("sh", sh("cat >/dev/null; echo not json"));
    assert!(source.analyze("text").await.is_err());
}
