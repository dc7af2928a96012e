//! End-to-end properties of the index engine on real directory trees.

use findex::engine::IndexEngine;
use findex::error::{Error, SelectionError};
use findex::index::{LoadStatus, SnapshotStore, walk_tree};
use findex::query::QuerySpec;
use findex::utils::IndexPaths;
use std::fs::{self, File};
use std::path::Path;
use tempfile::TempDir;

/// A small tree with nested, empty and file-less directories
fn create_tree(root: &Path) {
    for dir in ["docs/2023", "docs/archive/old", "src/bin", "empty", "media"] {
        fs::create_dir_all(root.join(dir)).unwrap();
    }
    for file in [
        "README.md",
        "docs/report.doc",
        "docs/2023/Q1 Report.DOC",
        "docs/archive/old/notes.txt",
        "src/main.rs",
        "src/lib.rs",
        "src/bin/tool.rs",
    ] {
        File::create(root.join(file)).unwrap();
    }
}

fn engine_in(data: &TempDir) -> IndexEngine {
    IndexEngine::new(IndexPaths::in_dir(data.path()))
}

#[test]
fn test_tree_without_files_builds_empty_snapshot() {
    let data = TempDir::new().unwrap();
    let tree = TempDir::new().unwrap();
    fs::create_dir_all(tree.path().join("a/b")).unwrap();
    fs::create_dir_all(tree.path().join("c")).unwrap();

    let mut engine = engine_in(&data);
    let report = engine.build_index(tree.path()).unwrap();

    assert_eq!(report.entries, 0);
    assert!(engine.snapshot().unwrap().is_empty());
    assert_eq!(engine.search(&QuerySpec::contains("")).num_scanned, 0);
}

#[test]
fn test_file_less_directories_are_listed_but_not_entries() {
    let data = TempDir::new().unwrap();
    let tree = TempDir::new().unwrap();
    create_tree(tree.path());

    let mut engine = engine_in(&data);
    engine.build_index(tree.path()).unwrap();
    let snapshot = engine.snapshot().unwrap();

    let entry_paths: Vec<&str> = snapshot.entries.iter().map(|e| e.path.as_str()).collect();
    for pruned in ["empty", "media", "docs/archive"] {
        let path = tree.path().join(pruned).to_string_lossy().into_owned();
        assert!(!entry_paths.contains(&path.as_str()), "{} should be pruned", pruned);
    }

    let root_entry = &snapshot.entries[0];
    assert_eq!(root_entry.path, tree.path().to_string_lossy());
    assert_eq!(
        root_entry.subdirectory_names,
        vec!["docs", "empty", "media", "src"]
    );

    // The folder search still finds pruned directories through their parent
    let folders = engine.search(&QuerySpec::contains("EMPT").folders()).clone();
    assert_eq!(
        folders.paths,
        vec![tree.path().join("empty").to_string_lossy().into_owned()]
    );
}

#[test]
fn test_saved_snapshot_round_trips() {
    let data = TempDir::new().unwrap();
    let tree = TempDir::new().unwrap();
    create_tree(tree.path());

    let mut engine = engine_in(&data);
    engine.build_index(tree.path()).unwrap();
    let built = engine.snapshot().cloned().unwrap();

    let loaded = SnapshotStore::new(IndexPaths::in_dir(data.path()).snapshot)
        .load()
        .unwrap();
    assert_eq!(loaded, built);

    let mut fresh = engine_in(&data);
    assert_eq!(
        fresh.load_index(),
        LoadStatus::Loaded {
            entries: built.len()
        }
    );
    assert_eq!(fresh.snapshot(), Some(&built));
}

#[test]
fn test_walk_matches_engine_build() {
    let data = TempDir::new().unwrap();
    let tree = TempDir::new().unwrap();
    create_tree(tree.path());

    let (walked, _) = walk_tree(tree.path()).unwrap();
    let mut engine = engine_in(&data);
    engine.build_index(tree.path()).unwrap();

    assert_eq!(engine.snapshot().unwrap().entries, walked.entries);
}

#[test]
fn test_searches_are_case_insensitive_and_repeatable() {
    let data = TempDir::new().unwrap();
    let tree = TempDir::new().unwrap();
    create_tree(tree.path());

    let mut engine = engine_in(&data);
    engine.build_index(tree.path()).unwrap();

    let spec = QuerySpec::contains("DOC");
    let first = engine.search(&spec).clone();
    let second = engine.search(&spec).clone();

    assert_eq!(first, second);
    assert_eq!(first.num_matches, 2);
    assert!(first.paths.iter().any(|p| p.ends_with("report.doc")));
    assert!(first.paths.iter().any(|p| p.ends_with("Q1 Report.DOC")));
}

#[test]
fn test_empty_prefix_matches_every_file() {
    let data = TempDir::new().unwrap();
    let tree = TempDir::new().unwrap();
    create_tree(tree.path());

    let mut engine = engine_in(&data);
    engine.build_index(tree.path()).unwrap();

    let result = engine.search(&QuerySpec::starts_with("")).clone();
    assert_eq!(result.num_matches, result.num_scanned);
    assert_eq!(result.num_matches, 7);

    let mirrored = fs::read_to_string(IndexPaths::in_dir(data.path()).results).unwrap();
    assert_eq!(mirrored.lines().collect::<Vec<_>>(), result.paths);
}

#[test]
fn test_open_out_of_range_positions() {
    let data = TempDir::new().unwrap();
    let tree = TempDir::new().unwrap();
    create_tree(tree.path());

    let mut engine = engine_in(&data);
    engine.build_index(tree.path()).unwrap();
    let n = engine.search(&QuerySpec::ends_with(".rs")).len();
    assert_eq!(n, 3);

    for position in [-1, n as i64] {
        let err = engine.open_match(position).unwrap_err();
        assert!(
            matches!(err, Error::Selection(SelectionError::OutOfRange { .. })),
            "position {} gave {:?}",
            position,
            err
        );
    }
}

#[test]
fn test_rebuild_replaces_snapshot_wholesale() {
    let data = TempDir::new().unwrap();
    let tree = TempDir::new().unwrap();
    create_tree(tree.path());

    let mut engine = engine_in(&data);
    engine.build_index(tree.path()).unwrap();
    assert_eq!(engine.search(&QuerySpec::contains("tool")).num_matches, 1);

    fs::remove_dir_all(tree.path().join("src")).unwrap();
    engine.build_index(tree.path()).unwrap();
    assert_eq!(engine.search(&QuerySpec::contains("tool")).num_matches, 0);
}
