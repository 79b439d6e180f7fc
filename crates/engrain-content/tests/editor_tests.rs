//! Editor lifecycle tests against real files

use engrain_content::{DocumentEditor, Error};
use engrain_fs::NormalizedPath;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

fn editor_in(dir: &tempfile::TempDir) -> DocumentEditor {
    DocumentEditor::new(NormalizedPath::new(dir.path().join("AGENTS.md")))
}

#[test]
fn inject_into_missing_file_creates_wrapper_and_block() {
    let dir = tempdir().unwrap();
    let editor = editor_in(&dir);

    let existed = editor.inject_block("proj", "INDEX-CONTENT", false).unwrap();
    assert!(!existed);

    let content = fs::read_to_string(dir.path().join("AGENTS.md")).unwrap();
    assert!(content.starts_with("<engrain important=\""));
    assert!(content.contains("<docs name=\"proj\">"));
    assert!(content.contains("INDEX-CONTENT"));
    assert!(content.ends_with("</engrain>\n"));
    assert_eq!(editor.block_names().unwrap(), vec!["proj"]);
}

#[test]
fn inject_into_foreign_file_fails_without_touching_it() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("AGENTS.md");
    fs::write(&target, "# Hand-written file\n").unwrap();
    let editor = editor_in(&dir);

    let err = editor.inject_block("proj", "INDEX", false).unwrap_err();
    assert!(matches!(err, Error::MissingWrapper { .. }));
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "# Hand-written file\n"
    );
}

#[test]
fn conflicting_inject_without_force_leaves_file_unchanged() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("AGENTS.md");
    let editor = editor_in(&dir);

    editor.inject_block("proj", "FIRST", false).unwrap();
    let before = fs::read_to_string(&target).unwrap();

    let err = editor.inject_block("proj", "SECOND", false).unwrap_err();
    match err {
        Error::AlreadyExists { name, .. } => assert_eq!(name, "proj"),
        other => panic!("expected AlreadyExists, got {other}"),
    }
    assert_eq!(fs::read_to_string(&target).unwrap(), before);
}

#[test]
fn repeated_force_injection_is_idempotent() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("AGENTS.md");
    let editor = editor_in(&dir);

    editor.inject_block("proj", "INDEX-A", false).unwrap();
    assert!(editor.inject_block("proj", "INDEX-A", true).unwrap());
    let first = fs::read_to_string(&target).unwrap();
    assert!(editor.inject_block("proj", "INDEX-A", true).unwrap());
    let second = fs::read_to_string(&target).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.matches("<docs name=\"proj\">").count(), 1);
}

#[test]
fn remove_absent_block_performs_no_write() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("AGENTS.md");
    let editor = editor_in(&dir);

    // Missing file: no-op, file must not be created.
    assert!(!editor.remove_block("ghost").unwrap());
    assert!(!target.exists());

    editor.inject_block("proj", "INDEX", false).unwrap();
    let before_content = fs::read_to_string(&target).unwrap();
    let before_mtime = fs::metadata(&target).unwrap().modified().unwrap();

    assert!(!editor.remove_block("ghost").unwrap());
    assert_eq!(fs::read_to_string(&target).unwrap(), before_content);
    assert_eq!(
        fs::metadata(&target).unwrap().modified().unwrap(),
        before_mtime
    );
}

#[test]
fn full_lifecycle_remove_block_then_wrapper_deletes_file() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("AGENTS.md");
    let editor = editor_in(&dir);

    editor.inject_block("proj", "INDEX", false).unwrap();
    assert!(editor.remove_block("proj").unwrap());
    assert!(editor.block_names().unwrap().is_empty());
    assert!(target.exists(), "empty wrapper remains until removed");

    assert!(editor.remove_wrapper().unwrap());
    assert!(!target.exists(), "wrapper-only file is deleted");
    assert!(!editor.remove_wrapper().unwrap());
}

#[test]
fn remove_wrapper_directly_deletes_wrapper_only_file() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("AGENTS.md");
    let editor = editor_in(&dir);

    editor.inject_block("a", "A", false).unwrap();
    editor.inject_block("b", "B", false).unwrap();
    assert!(editor.remove_wrapper().unwrap());
    assert!(!target.exists());
}

#[test]
fn remove_wrapper_keeps_unrelated_content() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("AGENTS.md");
    let editor = editor_in(&dir);

    editor.inject_block("proj", "INDEX", false).unwrap();
    let wrapper_doc = fs::read_to_string(&target).unwrap();
    fs::write(
        &target,
        format!("Intro paragraph.\n\n{wrapper_doc}\nOutro paragraph.\n"),
    )
    .unwrap();

    assert!(editor.remove_wrapper().unwrap());
    let remaining = fs::read_to_string(&target).unwrap();
    assert_eq!(remaining, "Intro paragraph.\n\nOutro paragraph.\n");
}

#[test]
fn two_injections_share_one_wrapper_in_insertion_order() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("AGENTS.md");
    let editor = editor_in(&dir);

    editor.inject_block("a", "FIRST", false).unwrap();
    editor.inject_block("b", "SECOND", false).unwrap();

    let content = fs::read_to_string(&target).unwrap();
    assert_eq!(content.matches("<engrain ").count(), 1);
    assert_eq!(content.matches("</engrain>").count(), 1);
    assert_eq!(editor.block_names().unwrap(), vec!["a", "b"]);
}
