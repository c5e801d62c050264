//! Added-block detection as seen through the public API.

use typolens_core::find_differences;
use typolens_utils::compute_diff_stats;

#[test]
fn identical_text_has_no_additions() {
    let text = "alpha\nbeta\ngamma\n";
    assert!(find_differences(text, text).is_empty());
    assert!(find_differences("", "").is_empty());
}

#[test]
fn appended_line_is_returned_exactly() {
    assert_eq!(find_differences("foo\nbar\n", "foo\nbar\nbaz\n"), vec!["baz"]);
}

#[test]
fn insertions_keep_document_order() {
    let before = "a\nb\nc\n";
    let after = "first\na\nmiddle one\nmiddle two\nb\nc\nlast\n";
    assert_eq!(
        find_differences(before, after),
        vec!["first", "middle one\nmiddle two", "last"]
    );
}

#[test]
fn deletions_only_yield_nothing() {
    assert!(find_differences("a\nb\nc\n", "a\nc\n").is_empty());
    assert_eq!(compute_diff_stats("a\nb\nc\n", "a\nc\n"), (0, 1));
}

#[test]
fn everything_is_new_against_empty_baseline() {
    assert_eq!(find_differences("", "one\ntwo"), vec!["one\ntwo"]);
}
