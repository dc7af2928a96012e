//! # findex - Persistent file name index
//!
//! findex walks a directory tree once, stores a snapshot of every directory
//! that holds files, and answers repeated substring, prefix and suffix
//! queries over file and folder names without touching the filesystem again.
//!
//! ## Architecture
//!
//! - [`index`] - Tree walking and snapshot storage
//! - [`query`] - Query specs, name matching and match lists
//! - [`engine`] - The stateful engine tying build, load, search and open together
//! - [`output`] - Results file mirror and terminal listing
//! - [`error`] - Error kinds surfaced by the engine
//! - [`utils`] - Configuration, data locations and progress display
//!
//! ## Quick Start
//!
//! ```no_run
//! use findex::engine::IndexEngine;
//! use findex::query::QuerySpec;
//! use findex::utils::IndexPaths;
//! use std::path::Path;
//!
//! let mut engine = IndexEngine::new(IndexPaths::in_dir(Path::new("/tmp/findex")));
//! engine.build_index(Path::new("/home/user/documents")).unwrap();
//!
//! let result = engine.search(&QuerySpec::ends_with(".pdf"));
//! for (i, path) in result.paths.iter().enumerate() {
//!     println!("{}: {}", i, path);
//! }
//! ```

pub mod engine;
pub mod error;
pub mod index;
pub mod output;
pub mod query;
pub mod utils;

pub use engine::{IndexEngine, Request, Response};
pub use error::{Error, Result, SelectionError};
