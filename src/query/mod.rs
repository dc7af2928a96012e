//! Name queries over a snapshot.
//!
//! A query is a [`QuerySpec`]: a term, one [`MatchMode`] and one [`Target`].
//! Matching is case-insensitive and scans entries in snapshot order, so the
//! same spec against the same snapshot always yields the same
//! [`MatchResult`].

pub mod executor;
pub mod parser;
pub mod spec;

pub use executor::{MatchResult, NameMatcher, execute};
pub use parser::parse_query;
pub use spec::{MatchMode, QuerySpec, Target};
