//! The index engine: sole owner of the current snapshot and the last match list.
//!
//! The engine is single-threaded and synchronous. A build walks the tree,
//! persists the result, and only then replaces the in-memory snapshot, so a
//! failed build never leaves a half-updated index behind. Searches scan the
//! in-memory snapshot and mirror their match list to the results file.

use crate::error::{Error, Result, SelectionError};
use crate::index::build::walk_tree_with_progress;
use crate::index::store::SnapshotStore;
use crate::index::types::{BuildReport, LoadStatus, Snapshot};
use crate::output::write_results_file;
use crate::query::{MatchResult, QuerySpec, execute};
use crate::utils::IndexPaths;
use std::io;
use std::path::{Path, PathBuf};

/// Hands a resolved path to the host environment
pub trait Opener {
    fn open(&self, path: &Path) -> io::Result<()>;
}

/// Opens paths with the platform's default application
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&self, path: &Path) -> io::Result<()> {
        open::that(path)
    }
}

/// A request from a presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Build(PathBuf),
    Search(QuerySpec),
    Open(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Built(BuildReport),
    Matches(MatchResult),
    /// The path handed to the host
    Opened(String),
}

pub struct IndexEngine {
    store: SnapshotStore,
    results_path: PathBuf,
    /// `None` until a snapshot has been loaded or built
    snapshot: Option<Snapshot>,
    last_result: Option<MatchResult>,
    opener: Box<dyn Opener>,
}

impl IndexEngine {
    pub fn new(paths: IndexPaths) -> Self {
        Self::with_opener(paths, Box::new(SystemOpener))
    }

    pub fn with_opener(paths: IndexPaths, opener: Box<dyn Opener>) -> Self {
        Self {
            store: SnapshotStore::new(paths.snapshot),
            results_path: paths.results,
            snapshot: None,
            last_result: None,
            opener,
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn results_path(&self) -> &Path {
        &self.results_path
    }

    /// Whether a snapshot has been loaded or built
    pub fn is_indexed(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn last_result(&self) -> Option<&MatchResult> {
        self.last_result.as_ref()
    }

    /// Walk `root`, persist the snapshot and make it current
    pub fn build_index(&mut self, root: &Path) -> Result<BuildReport> {
        self.build_index_with_progress(root, |_| {})
    }

    /// Like [`build_index`](Self::build_index), reporting visited directories as it goes
    pub fn build_index_with_progress<F>(&mut self, root: &Path, on_directory: F) -> Result<BuildReport>
    where
        F: FnMut(usize),
    {
        let (snapshot, report) = walk_tree_with_progress(root, on_directory)?;
        self.store.save(&snapshot)?;

        log::debug!(
            "indexed {}: {} entries from {} directories",
            root.display(),
            report.entries,
            report.directories_visited
        );
        self.snapshot = Some(snapshot);
        Ok(report)
    }

    /// Replace the current snapshot with the stored one
    ///
    /// Never fails: a missing or unreadable snapshot leaves the engine with an
    /// empty index, and the returned status says which case occurred.
    pub fn load_index(&mut self) -> LoadStatus {
        let (snapshot, status) = match self.store.load() {
            Ok(snapshot) if snapshot.is_empty() && !self.store.exists() => {
                (snapshot, LoadStatus::Missing)
            }
            Ok(snapshot) => {
                let entries = snapshot.len();
                (snapshot, LoadStatus::Loaded { entries })
            }
            Err(err) => {
                log::warn!("ignoring stored snapshot: {}", err);
                let reason = err.to_string();
                let status = match err {
                    Error::SnapshotCorrupt { .. } => LoadStatus::Corrupt { reason },
                    _ => LoadStatus::Unreadable { reason },
                };
                (Snapshot::default(), status)
            }
        };
        self.snapshot = Some(snapshot);
        status
    }

    /// Scan the current snapshot and mirror the matches to the results file
    pub fn search(&mut self, spec: &QuerySpec) -> &MatchResult {
        let result = match &self.snapshot {
            Some(snapshot) => execute(snapshot, spec),
            None => MatchResult::default(),
        };

        log::debug!(
            "search {:?} ({}, {}): {} of {} names matched",
            spec.term,
            spec.mode,
            spec.target,
            result.num_matches,
            result.num_scanned
        );

        if let Err(err) = write_results_file(&self.results_path, &result) {
            log::warn!("could not mirror results: {}", err);
        }

        self.last_result.insert(result)
    }

    /// Resolve a zero-based position against the last match list
    pub fn resolve(&self, position: i64) -> Result<&str> {
        let result = self.last_result.as_ref().ok_or(SelectionError::NoSearch)?;
        usize::try_from(position)
            .ok()
            .and_then(|idx| result.get(idx))
            .ok_or_else(|| {
                SelectionError::OutOfRange {
                    position,
                    len: result.len(),
                }
                .into()
            })
    }

    /// Open the match at `position` with the host's default handler
    pub fn open_match(&self, position: i64) -> Result<String> {
        let path = self.resolve(position)?.to_string();
        self.opener
            .open(Path::new(&path))
            .map_err(|source| Error::Open {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }

    /// Seed the last match list from previously mirrored paths
    ///
    /// Used when a new process wants to open an entry of a search run earlier.
    pub fn restore_results(&mut self, paths: Vec<String>) {
        let count = paths.len();
        self.last_result = Some(MatchResult {
            paths,
            num_scanned: count,
            num_matches: count,
        });
    }

    /// Dispatch a typed request
    pub fn handle(&mut self, request: Request) -> Result<Response> {
        match request {
            Request::Build(root) => self.build_index(&root).map(Response::Built),
            Request::Search(spec) => Ok(Response::Matches(self.search(&spec).clone())),
            Request::Open(position) => self.open_match(position).map(Response::Opened),
        }
    }
}

/// Parse a user-entered match number
pub fn parse_position(text: &str) -> std::result::Result<i64, SelectionError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(SelectionError::NothingSelected);
    }
    text.parse::<i64>()
        .map_err(|_| SelectionError::NotANumber(text.to_string()))
}
