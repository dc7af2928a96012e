//! Utility functions shared by the library and the CLI.
//!
//! ## Modules
//!
//! - [`app_data`] - Configuration and data file locations (XDG-compliant)
//! - [`progress`] - Spinner for long walks (no-op without the `progress` feature)

pub mod app_data;
pub mod progress;

pub use app_data::*;
