pub mod build;
pub mod stats;
pub mod store;
pub mod types;

pub use build::{walk_tree, walk_tree_with_progress};
pub use stats::SnapshotStats;
pub use store::SnapshotStore;
pub use types::*;
