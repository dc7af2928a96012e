use std::path::PathBuf;

/// Errors produced by the index engine and snapshot store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The root path of a build is missing, not a directory, or unreadable.
    #[error("cannot index {}: {reason}", path.display())]
    Path { path: PathBuf, reason: String },

    /// A stored snapshot exists but cannot be decoded.
    #[error("snapshot {} is corrupt: {reason}", path.display())]
    SnapshotCorrupt { path: PathBuf, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// The host refused to open a resolved match.
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Why a position could not be resolved against the last match list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("no search has been performed yet")]
    NoSearch,

    #[error("no match selected")]
    NothingSelected,

    #[error("{0:?} is not a match number")]
    NotANumber(String),

    #[error("match {position} is out of range ({len} matches)")]
    OutOfRange { position: i64, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn path(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::Path {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
