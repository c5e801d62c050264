//! Config file to running tracker.

use std::io::Write;

use typolens_config::TypolensConfig;
use typolens_core::TypoTracker;
use typolens_source::{SourceKind, build_source};
use typolens_types::PositionEncoding;

use crate::common::{doc, shown};

#[tokio::test]
async fn dictionary_config_drives_tracker() {
    let dir = tempfile::tempdir().unwrap();
    let words = dir.path().join("words.txt");
    std::fs::write(&words, "teh->the\n").unwrap();

    let config_path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&config_path).unwrap();
    writeln!(
        file,
        "[source]\nkind = \"dictionary\"\ndictionary = {:?}\n\n[source.words]\nadn = \"and\"\n\n[tracker]\nposition_encoding = \"utf-8\"",
        words.display().to_string()
    )
    .unwrap();

    let config = TypolensConfig::load_from(&config_path).unwrap();
    assert_eq!(config.source().kind, SourceKind::Dictionary);
    assert_eq!(config.tracker().position_encoding, PositionEncoding::Utf8);

    let source = build_source(&config.source()).unwrap();
    let mut tracker = TypoTracker::with_source(source, &config.tracker());
    let id = doc("cfg.txt");
    tracker.open(&id, "");
    tracker.save(&id, "é teh adn\n");
    tracker.next_event().await.unwrap();

    assert_eq!(shown(&tracker, &id), vec!["teh", "adn"]);
    // utf-8 columns count bytes: "é " is three.
    assert_eq!(tracker.diagnostics_for(&id).unwrap()[0].range().start.character, 3);
}

#[test]
fn missing_dictionary_file_fails_to_build() {
    let dir = tempfile::tempdir().unwrap();
    let config = TypolensConfig::parse(&format!(
        "[source]\nkind = \"dictionary\"\ndictionary = {:?}\n",
        dir.path().join("absent.txt").display().to_string()
    ))
    .unwrap();
    assert!(build_source(&config.source()).is_err());
}
