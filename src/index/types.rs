use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Snapshot format version - increment when changing the stored layout
pub const SNAPSHOT_VERSION: u32 = 1;

/// One visited directory and the names of its immediate children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub path: String,
    /// Immediate subdirectory names in walk order
    pub subdirectory_names: Vec<String>,
    /// Immediate file names in walk order
    pub file_names: Vec<String>,
}

impl DirectoryEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            subdirectory_names: Vec::new(),
            file_names: Vec::new(),
        }
    }

    /// Fully-qualified path of a child name of this directory
    pub fn child_path(&self, name: &str) -> String {
        Path::new(&self.path).join(name).to_string_lossy().into_owned()
    }
}

/// Point-in-time record of an indexed tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Root path the snapshot was built from (empty for an empty snapshot)
    pub root: String,
    /// Build time in seconds since the Unix epoch
    pub built_at: u64,
    pub entries: Vec<DirectoryEntry>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn file_count(&self) -> usize {
        self.entries.iter().map(|e| e.file_names.len()).sum()
    }

    pub fn folder_count(&self) -> usize {
        self.entries.iter().map(|e| e.subdirectory_names.len()).sum()
    }
}

/// Summary of a completed build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub root: PathBuf,
    /// Directories visited by the walk, including pruned ones
    pub directories_visited: usize,
    /// Directories kept as entries (those holding at least one file)
    pub entries: usize,
    pub files: usize,
    pub folders: usize,
    /// Directories below the root that could not be read
    pub skipped: usize,
}

/// Outcome of loading the stored snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded { entries: usize },
    /// No snapshot has been stored yet
    Missing,
    /// A snapshot exists but could not be decoded; the engine holds an empty one
    Corrupt { reason: String },
    /// The snapshot file could not be read at all (permissions, not a file)
    Unreadable { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_path_joins_with_separator() {
        let entry = DirectoryEntry::new("/root/sub");
        let expected = PathBuf::from("/root/sub").join("b.txt");
        assert_eq!(entry.child_path("b.txt"), expected.to_string_lossy());
    }

    #[test]
    fn test_snapshot_counts() {
        let snapshot = Snapshot {
            root: "/root".to_string(),
            built_at: 0,
            entries: vec![
                DirectoryEntry {
                    path: "/root".to_string(),
                    subdirectory_names: vec!["sub".to_string(), "empty".to_string()],
                    file_names: vec!["a.txt".to_string()],
                },
                DirectoryEntry {
                    path: "/root/sub".to_string(),
                    subdirectory_names: vec![],
                    file_names: vec!["b.txt".to_string(), "c.txt".to_string()],
                },
            ],
        };

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.file_count(), 3);
        assert_eq!(snapshot.folder_count(), 2);
        assert!(Snapshot::default().is_empty());
    }
}
