use crate::index::types::Snapshot;
use crate::query::spec::{MatchMode, QuerySpec, Target};
use serde::{Deserialize, Serialize};

/// Ordered output of one query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Fully-qualified paths in scan order
    pub paths: Vec<String>,
    /// Candidate names examined
    pub num_scanned: usize,
    pub num_matches: usize,
}

impl MatchResult {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&str> {
        self.paths.get(position).map(String::as_str)
    }
}

/// Case-insensitive name predicate for a single match mode
#[derive(Debug, Clone)]
pub struct NameMatcher {
    needle: String,
    mode: MatchMode,
}

impl NameMatcher {
    pub fn new(term: &str, mode: MatchMode) -> Self {
        Self {
            needle: term.to_lowercase(),
            mode,
        }
    }

    /// An empty term matches every name
    pub fn is_match(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        match self.mode {
            MatchMode::Contains => name.contains(&self.needle),
            MatchMode::EndsWith => name.ends_with(&self.needle),
            MatchMode::StartsWith => name.starts_with(&self.needle),
        }
    }
}

/// Scan every candidate name of `snapshot` against `spec`
pub fn execute(snapshot: &Snapshot, spec: &QuerySpec) -> MatchResult {
    let matcher = NameMatcher::new(&spec.term, spec.mode);
    let mut result = MatchResult::default();

    for entry in &snapshot.entries {
        let candidates = match spec.target {
            Target::Folders => &entry.subdirectory_names,
            Target::Files => &entry.file_names,
        };

        for name in candidates {
            result.num_scanned += 1;
            if matcher.is_match(name) {
                result.num_matches += 1;
                result.paths.push(entry.child_path(name));
            }
        }
    }

    result
}
