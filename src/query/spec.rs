use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a name is compared against the search term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Term appears anywhere in the name
    #[default]
    Contains,
    /// Name ends with the term
    EndsWith,
    /// Name starts with the term
    StartsWith,
}

/// Which child names of each directory are searched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Target {
    #[default]
    Files,
    Folders,
}

/// One search: a term, a match mode and a target
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuerySpec {
    pub term: String,
    pub mode: MatchMode,
    pub target: Target,
}

impl QuerySpec {
    pub fn new(term: impl Into<String>, mode: MatchMode, target: Target) -> Self {
        Self {
            term: term.into(),
            mode,
            target,
        }
    }

    pub fn contains(term: impl Into<String>) -> Self {
        Self::new(term, MatchMode::Contains, Target::Files)
    }

    pub fn starts_with(term: impl Into<String>) -> Self {
        Self::new(term, MatchMode::StartsWith, Target::Files)
    }

    pub fn ends_with(term: impl Into<String>) -> Self {
        Self::new(term, MatchMode::EndsWith, Target::Files)
    }

    /// Search folder names instead of file names
    pub fn folders(mut self) -> Self {
        self.target = Target::Folders;
        self
    }
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "contains" | "c" => Ok(MatchMode::Contains),
            "ends-with" | "endswith" | "ends" | "e" => Ok(MatchMode::EndsWith),
            "starts-with" | "startswith" | "starts" | "s" => Ok(MatchMode::StartsWith),
            other => Err(format!("unknown match mode: {}", other)),
        }
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "files" | "f" => Ok(Target::Files),
            "folder" | "folders" | "dir" | "dirs" | "d" => Ok(Target::Folders),
            other => Err(format!("unknown target: {}", other)),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchMode::Contains => "contains",
            MatchMode::EndsWith => "ends with",
            MatchMode::StartsWith => "starts with",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Target::Files => "files",
            Target::Folders => "folders",
        };
        f.write_str(s)
    }
}
