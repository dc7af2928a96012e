//! Spinner shown while a tree is walked; becomes no-op when the `progress` feature is disabled

#[cfg(feature = "progress")]
pub use self::bar::WalkSpinner;

#[cfg(not(feature = "progress"))]
pub use self::noop::WalkSpinner;

#[cfg(feature = "progress")]
mod bar {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::path::Path;
    use std::time::Duration;

    /// Only redraw the message every this many directories
    const TICK_EVERY: usize = 64;

    pub struct WalkSpinner {
        bar: ProgressBar,
    }

    impl WalkSpinner {
        pub fn new(root: &Path) -> Self {
            let bar = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
                bar.set_style(style);
            }
            bar.set_message(format!("Indexing {}...", root.display()));
            bar.enable_steady_tick(Duration::from_millis(80));
            Self { bar }
        }

        pub fn directories(&self, visited: usize) {
            if visited % TICK_EVERY == 0 {
                self.bar.set_message(format!("{} directories visited", visited));
            }
        }

        pub fn clear(&self) {
            self.bar.finish_and_clear();
        }
    }
}

#[cfg(not(feature = "progress"))]
mod noop {
    use std::path::Path;

    /// No-op spinner when `progress` feature is disabled
    pub struct WalkSpinner;

    impl WalkSpinner {
        pub fn new(_root: &Path) -> Self {
            WalkSpinner
        }

        pub fn directories(&self, _visited: usize) {}
        pub fn clear(&self) {}
    }
}
