use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "findex";
const CONFIG_FILE: &str = "config.json";
const SNAPSHOT_FILE: &str = "index_data.json";
const RESULTS_FILE: &str = "matched_files.txt";

/// Application configuration stored in the app data directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root indexed when no path is given
    #[serde(default = "default_root")]
    pub default_root: PathBuf,

    /// Snapshot file; relative paths resolve against the data directory
    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: PathBuf,

    /// Results mirror file; relative paths resolve against the data directory
    #[serde(default = "default_results_file")]
    pub results_file: PathBuf,
}

fn default_root() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from("C:\\")
    } else {
        PathBuf::from("/")
    }
}

fn default_snapshot_file() -> PathBuf {
    PathBuf::from(SNAPSHOT_FILE)
}

fn default_results_file() -> PathBuf {
    PathBuf::from(RESULTS_FILE)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_root: default_root(),
            snapshot_file: default_snapshot_file(),
            results_file: default_results_file(),
        }
    }
}

impl AppConfig {
    /// Load config from `data_dir`, or return default if not found
    pub fn load_from(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            let config: AppConfig = serde_json::from_str(&content)
                .context("Failed to parse config file")?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from `data_dir`, writing the defaults there on first run
    pub fn load_or_create(data_dir: &Path) -> Result<Self> {
        if data_dir.join(CONFIG_FILE).exists() {
            return Self::load_from(data_dir);
        }

        let config = Self::default();
        if let Err(err) = config.save_to(data_dir) {
            log::warn!("could not write default config: {:#}", err);
        }
        Ok(config)
    }

    /// Save config to `data_dir`
    pub fn save_to(&self, data_dir: &Path) -> Result<()> {
        fs::create_dir_all(data_dir)?;
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(data_dir.join(CONFIG_FILE), content)
            .context("Failed to write config file")?;
        Ok(())
    }

    /// Resolve the snapshot and results files against `data_dir`
    pub fn index_paths(&self, data_dir: &Path) -> IndexPaths {
        IndexPaths {
            snapshot: data_dir.join(&self.snapshot_file),
            results: data_dir.join(&self.results_file),
        }
    }
}

/// Locations of the two files an engine owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPaths {
    pub snapshot: PathBuf,
    pub results: PathBuf,
}

impl IndexPaths {
    /// Default file names inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        AppConfig::default().index_paths(dir)
    }
}

/// Get the application data directory
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir()
            .map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    let app_dir = base.join(APP_NAME);

    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}

/// Use `override_dir` when given, otherwise the per-user app data directory
pub fn resolve_data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    match override_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
            Ok(dir.to_path_buf())
        }
        None => get_app_data_dir(),
    }
}
