//! End-to-end integration tests for the full embed flow
//!
//! Exercises fetch/copy -> discovery -> serialization -> validation ->
//! injection -> lock-file maintenance across the workspace crates.

use engrain_core::Engine;
use engrain_fs::NormalizedPath;
use engrain_index::{instruction_for, validate};
use git2::{Repository, Signature};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

fn engine_for(project: &TempDir) -> Engine {
    let root = NormalizedPath::new(project.path());
    let cache = root.join(".engrain").join("cache");
    Engine::new(root, "AGENTS.md", ".engrain/docs", cache)
}

fn seed_git_source(path: &Path) -> String {
    let repo = Repository::init(path).unwrap();
    fs::write(path.join("a.md"), "# a\n").unwrap();
    fs::create_dir_all(path.join("sub")).unwrap();
    fs::write(path.join("sub/b.md"), "# b\n").unwrap();
    fs::write(path.join("sub/c,d.md"), "# cd\n").unwrap();

    let signature = Signature::now("Test User", "test@example.com").unwrap();
    let tree_id = {
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("a.md")).unwrap();
        index.add_path(Path::new("sub/b.md")).unwrap();
        index.add_path(Path::new("sub/c,d.md")).unwrap();
        index.write().unwrap();
        index.write_tree().unwrap()
    };
    let tree = repo.find_tree(tree_id).unwrap();
    repo.commit(Some("HEAD"), &signature, &signature, "seed docs", &tree, &[])
        .unwrap();
    format!("file://{}", path.display())
}

#[test]
fn git_source_produces_documented_index_shape() {
    let project = tempdir().unwrap();
    let source = tempdir().unwrap();
    let url = seed_git_source(source.path());

    let engine = engine_for(&project);
    let outcome = engine.add(&url, Some("proj"), None, false).unwrap();
    assert_eq!(outcome.file_count, 3);
    assert!(outcome.commit.is_some());
    assert!(outcome.warnings.is_empty());

    let content = fs::read_to_string(project.path().join("AGENTS.md")).unwrap();
    let expected_index = format!(
        "[proj Docs Index]|root: .engrain/docs/proj|{}|.:{{a.md}}|sub:{{b.md,c\\,d.md}}",
        instruction_for("proj")
    );
    assert!(content.contains(&expected_index), "content: {content}");
    assert!(validate(&expected_index).is_empty());
}

#[test]
fn repeated_update_is_byte_stable() {
    let project = tempdir().unwrap();
    let source = tempdir().unwrap();
    let url = seed_git_source(source.path());

    let engine = engine_for(&project);
    engine.add(&url, Some("proj"), None, false).unwrap();
    let first = fs::read_to_string(project.path().join("AGENTS.md")).unwrap();

    engine.update(None).unwrap();
    engine.update(None).unwrap();
    let second = fs::read_to_string(project.path().join("AGENTS.md")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn multiple_sources_coexist_and_remove_cleanly() {
    let project = tempdir().unwrap();
    let git_source = tempdir().unwrap();
    let url = seed_git_source(git_source.path());

    let local_source = tempdir().unwrap();
    fs::write(local_source.path().join("local.md"), "# local\n").unwrap();

    let engine = engine_for(&project);
    engine.add(&url, Some("remote"), None, false).unwrap();
    engine
        .add(
            local_source.path().to_str().unwrap(),
            Some("local"),
            None,
            false,
        )
        .unwrap();

    let target = project.path().join("AGENTS.md");
    let content = fs::read_to_string(&target).unwrap();
    assert_eq!(content.matches("<engrain ").count(), 1);
    assert!(content.contains("<docs name=\"remote\">"));
    assert!(content.contains("<docs name=\"local\">"));

    assert!(engine.remove("remote").unwrap());
    let content = fs::read_to_string(&target).unwrap();
    assert!(!content.contains("<docs name=\"remote\">"));
    assert!(content.contains("<docs name=\"local\">"));

    assert!(engine.remove("local").unwrap());
    assert!(!target.exists());
    assert!(engine.list().unwrap().is_empty());
}

#[test]
fn injection_respects_hand_written_target_content() {
    let project = tempdir().unwrap();
    let target = project.path().join("AGENTS.md");
    fs::write(&target, "# Project conventions\n\nKeep functions small.\n").unwrap();

    let local_source = tempdir().unwrap();
    fs::write(local_source.path().join("x.md"), "# x\n").unwrap();

    let engine = engine_for(&project);
    let err = engine
        .add(local_source.path().to_str().unwrap(), Some("x"), None, false)
        .unwrap_err();
    assert!(matches!(
        err,
        engrain_core::Error::Content(engrain_content::Error::MissingWrapper { .. })
    ));
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "# Project conventions\n\nKeep functions small.\n"
    );
}
