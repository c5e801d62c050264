//! Open / edit / save / close behaviour of the typo tracker.

use typolens_core::{AnalysisOutcome, DocumentEvent};
use typolens_types::DIAGNOSTIC_CODE;

use crate::common::{dictionary, doc, shown, tracker_with};

#[tokio::test]
async fn open_save_close_lifecycle() {
    let mut tracker = tracker_with(dictionary());
    let id = doc("notes.md");

    tracker.open(&id, "hello world\n");
    assert_eq!(tracker.diagnostics_for(&id).map(<[_]>::len), Some(0));

    tracker.save(&id, "hello world\nteh end\n");
    let completion = tracker.next_event().await.unwrap();
    assert_eq!(completion.outcome, AnalysisOutcome::Applied { typos: 1 });

    let diags = tracker.diagnostics_for(&id).unwrap();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code(), DIAGNOSTIC_CODE);
    assert_eq!(diags[0].suggestions(), ["the"]);
    assert_eq!(diags[0].range().start.line, 1);
    assert_eq!(diags[0].range().start.character, 0);
    assert_eq!(diags[0].range().end.character, 3);

    tracker.close(&id);
    assert!(tracker.typos().get(&id).is_none());
    assert!(tracker.diagnostics().get(&id).is_none());
}

#[tokio::test]
async fn typos_in_unchanged_lines_are_not_reported() {
    let mut tracker = tracker_with(dictionary());
    let id = doc("legacy.txt");

    // Pre-existing misspelling in the baseline.
    tracker.open(&id, "teh old line\n");
    tracker.save(&id, "teh old line\nfresh adn new\n");
    tracker.next_event().await.unwrap();

    assert_eq!(shown(&tracker, &id), vec!["adn"]);
}

#[tokio::test]
async fn found_token_is_shown_everywhere_it_occurs() {
    let mut tracker = tracker_with(dictionary());
    let id = doc("a.txt");

    tracker.open(&id, "recieve one\n");
    tracker.save(&id, "recieve one\nrecieve two\n");
    tracker.next_event().await.unwrap();

    // Token came from the added line but every occurrence is located.
    assert_eq!(shown(&tracker, &id), vec!["recieve", "recieve"]);
}

#[tokio::test]
async fn edits_re_resolve_without_analysis() {
    let mut tracker = tracker_with(dictionary());
    let id = doc("a.txt");

    tracker.open(&id, "");
    tracker.save(&id, "teh\n");
    tracker.next_event().await.unwrap();
    assert_eq!(shown(&tracker, &id).len(), 1);

    tracker.change(&id, "teh teh\nteh\n");
    assert_eq!(shown(&tracker, &id).len(), 3);
    assert_eq!(tracker.in_flight(), 0);

    tracker.change(&id, "the\n");
    assert!(shown(&tracker, &id).is_empty());
    assert_eq!(tracker.typos().get(&id).map(Vec::len), Some(1));
}

#[tokio::test]
async fn save_without_new_lines_skips_analysis() {
    let mut tracker = tracker_with(dictionary());
    let id = doc("a.txt");

    tracker.open(&id, "one\ntwo\nthree\n");
    assert!(tracker.save(&id, "one\nthree\n").is_none());
    assert!(tracker.save(&id, "one\n\nthree\n").is_none());
    assert_eq!(tracker.in_flight(), 0);
    assert!(tracker.next_event().await.is_none());
}

#[tokio::test]
async fn next_save_replaces_typo_set() {
    let mut tracker = tracker_with(dictionary());
    let id = doc("a.txt");

    tracker.open(&id, "");
    tracker.save(&id, "teh\n");
    tracker.next_event().await.unwrap();
    tracker.save(&id, "teh\nadn\n");
    tracker.next_event().await.unwrap();

    // Second save analyzed only "adn"; the store holds that result alone.
    assert_eq!(shown(&tracker, &id), vec!["adn"]);
}

#[tokio::test]
async fn documents_are_partitioned() {
    let mut tracker = tracker_with(dictionary());
    let a = doc("a.txt");
    let b = doc("b.txt");

    tracker.open(&a, "");
    tracker.open(&b, "");
    tracker.save(&a, "teh\n");
    tracker.save(&b, "seperate\n");
    while tracker.next_event().await.is_some() {}

    assert_eq!(shown(&tracker, &a), vec!["teh"]);
    assert_eq!(shown(&tracker, &b), vec!["seperate"]);

    tracker.close(&a);
    assert_eq!(shown(&tracker, &b), vec!["seperate"]);
    assert_eq!(tracker.snapshot().total_count(), 1);
}

#[tokio::test]
async fn reopen_after_close_starts_fresh() {
    let mut tracker = tracker_with(dictionary());
    let id = doc("a.txt");

    tracker.open(&id, "");
    tracker.save(&id, "teh\n");
    tracker.next_event().await.unwrap();
    tracker.close(&id);

    tracker.open(&id, "teh\n");
    assert!(shown(&tracker, &id).is_empty());
    assert_eq!(tracker.baseline(&id), Some("teh\n"));
}

#[tokio::test]
async fn host_events_drive_the_tracker() {
    let mut tracker = tracker_with(dictionary());
    let id = doc("a.txt");

    let events = [
        DocumentEvent::Opened {
            id: id.clone(),
            text: "start\n".into(),
        },
        DocumentEvent::Changed {
            id: id.clone(),
            text: "start\nteh\n".into(),
        },
        DocumentEvent::Saved {
            id: id.clone(),
            text: "start\nteh\n".into(),
        },
    ];
    for event in events {
        tracker.handle_event(event);
    }
    while tracker.next_event().await.is_some() {}
    assert_eq!(shown(&tracker, &id), vec!["teh"]);

    tracker.handle_event(DocumentEvent::Closed { id: id.clone() });
    assert!(!tracker.is_tracked(&id));
}

#[tokio::test]
async fn snapshot_reports_status() {
    let mut tracker = tracker_with(dictionary());
    let id = doc("a.txt");
    tracker.open(&id, "");
    tracker.save(&id, "teh adn\n");
    tracker.next_event().await.unwrap();

    let snapshot = tracker.snapshot();
    assert_eq!(snapshot.warning_count(), 2);
    assert_eq!(snapshot.status_string(), "E:0 W:2");

    tracker.dispose_all();
    assert!(tracker.snapshot().is_empty());
}
