use crate::error::Result;
use crate::index::store::SnapshotStore;
use std::fmt;
use std::path::PathBuf;

/// Summary of the stored snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotStats {
    pub location: PathBuf,
    /// False when no snapshot has been saved yet
    pub exists: bool,
    pub root: String,
    pub entries: usize,
    pub files: usize,
    pub folders: usize,
    pub size_bytes: u64,
    pub built_at: u64,
}

impl SnapshotStats {
    /// Load the stored snapshot and summarize it
    pub fn collect(store: &SnapshotStore) -> Result<Self> {
        let snapshot = store.load()?;
        let size_bytes = std::fs::metadata(store.path()).map(|m| m.len()).unwrap_or(0);

        Ok(Self {
            location: store.path().to_path_buf(),
            exists: store.exists(),
            root: snapshot.root.clone(),
            entries: snapshot.len(),
            files: snapshot.file_count(),
            folders: snapshot.folder_count(),
            size_bytes,
            built_at: snapshot.built_at,
        })
    }
}

impl fmt::Display for SnapshotStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Index Statistics")?;
        writeln!(f, "================")?;
        writeln!(f)?;
        writeln!(f, "Snapshot:         {}", self.location.display())?;
        if !self.exists {
            return writeln!(f, "No index has been built yet.");
        }
        writeln!(f, "Root path:        {}", self.root)?;
        writeln!(f, "Directories:      {}", self.entries)?;
        writeln!(f, "File names:       {}", self.files)?;
        writeln!(f, "Folder names:     {}", self.folders)?;
        writeln!(f, "Snapshot size:    {}", format_size(self.size_bytes))?;
        writeln!(f, "Built:            {}", format_timestamp(self.built_at))
    }
}

/// Format byte size to human readable
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Format unix timestamp
fn format_timestamp(ts: u64) -> String {
    use std::time::{Duration, UNIX_EPOCH};
    let datetime = UNIX_EPOCH + Duration::from_secs(ts);
    format!("{:?} ({} s since epoch)", datetime, ts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::{DirectoryEntry, Snapshot};
    use tempfile::tempdir;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_stats_without_snapshot() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("index_data.json"));

        let stats = SnapshotStats::collect(&store).unwrap();
        assert!(!stats.exists);
        assert_eq!(stats.entries, 0);
        assert!(stats.to_string().contains("No index has been built yet."));
    }

    #[test]
    fn test_stats_counts() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("index_data.json"));
        store
            .save(&Snapshot {
                root: "/srv".to_string(),
                built_at: 42,
                entries: vec![DirectoryEntry {
                    path: "/srv".to_string(),
                    subdirectory_names: vec!["a".to_string(), "b".to_string()],
                    file_names: vec!["x".to_string()],
                }],
            })
            .unwrap();

        let stats = SnapshotStats::collect(&store).unwrap();
        assert!(stats.exists);
        assert_eq!(stats.root, "/srv");
        assert_eq!((stats.entries, stats.files, stats.folders), (1, 1, 2));
        assert!(stats.size_bytes > 0);
        assert!(stats.to_string().contains("Root path:        /srv"));
    }
}
