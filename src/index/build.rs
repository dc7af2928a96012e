use crate::error::{Error, Result};
use crate::index::types::{BuildReport, DirectoryEntry, Snapshot};
use ignore::WalkBuilder;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Walk `root` and collect every directory that holds at least one file
pub fn walk_tree(root: &Path) -> Result<(Snapshot, BuildReport)> {
    walk_tree_with_progress(root, |_| {})
}

/// Walk `root`, calling `on_directory` with the running count of visited directories
pub fn walk_tree_with_progress<F>(root: &Path, mut on_directory: F) -> Result<(Snapshot, BuildReport)>
where
    F: FnMut(usize),
{
    check_root(root)?;
    // Stored paths must not depend on the working directory of a later run
    let root = std::path::absolute(root).map_err(|e| Error::path(root, e.to_string()))?;
    let root = root.as_path();

    // Every name is indexed: no hidden-file or ignore-file filtering
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    // Directories in visit order, with a lookup from path to position
    let mut directories: Vec<DirectoryEntry> = Vec::new();
    let mut positions: HashMap<PathBuf, usize> = HashMap::new();
    let mut skipped = 0usize;

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                if err.depth() == Some(0) || is_root_error(&err, root) {
                    return Err(Error::path(root, err.to_string()));
                }
                log::warn!("skipping unreadable directory: {}", err);
                skipped += 1;
                continue;
            }
        };

        let path = entry.path();
        let is_dir = match entry.file_type() {
            Some(ft) if ft.is_dir() => true,
            // Symlinks to directories are listed as folders but never descended into
            Some(ft) if ft.is_symlink() => fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false),
            _ => false,
        };

        if entry.depth() == 0 {
            positions.insert(path.to_path_buf(), directories.len());
            directories.push(DirectoryEntry::new(path.to_string_lossy()));
            on_directory(directories.len());
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let parent = path
            .parent()
            .and_then(|p| positions.get(p).copied());
        if let Some(idx) = parent {
            if is_dir {
                directories[idx].subdirectory_names.push(name);
            } else {
                directories[idx].file_names.push(name);
            }
        }

        if entry.file_type().is_some_and(|ft| ft.is_dir()) {
            positions.insert(path.to_path_buf(), directories.len());
            directories.push(DirectoryEntry::new(path.to_string_lossy()));
            on_directory(directories.len());
        }
    }

    let directories_visited = directories.len();
    let entries: Vec<DirectoryEntry> = directories
        .into_iter()
        .filter(|dir| !dir.file_names.is_empty())
        .collect();

    let snapshot = Snapshot {
        root: root.to_string_lossy().into_owned(),
        built_at: unix_now_secs(),
        entries,
    };

    let report = BuildReport {
        root: root.to_path_buf(),
        directories_visited,
        entries: snapshot.len(),
        files: snapshot.file_count(),
        folders: snapshot.folder_count(),
        skipped,
    };

    Ok((snapshot, report))
}

/// The root must be an existing, readable directory
fn check_root(root: &Path) -> Result<()> {
    let metadata = fs::metadata(root).map_err(|e| Error::path(root, e.to_string()))?;
    if !metadata.is_dir() {
        return Err(Error::path(root, "not a directory"));
    }
    fs::read_dir(root).map_err(|e| Error::path(root, e.to_string()))?;
    Ok(())
}

fn is_root_error(err: &ignore::Error, root: &Path) -> bool {
    match err {
        ignore::Error::WithPath { path, .. } => path == root,
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            is_root_error(err, root)
        }
        _ => false,
    }
}

pub(crate) fn unix_now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
