mod shell;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use findex::engine::{IndexEngine, parse_position};
use findex::index::{LoadStatus, SnapshotStats};
use findex::output::{print_matches, read_results_file};
use findex::query::{MatchMode, QuerySpec, Target};
use findex::utils::progress::WalkSpinner;
use findex::utils::{AppConfig, resolve_data_dir};
use std::io;
use std::path::PathBuf;
use termcolor::{ColorChoice, StandardStream};

#[derive(Parser)]
#[command(name = "findex")]
#[command(about = "Index a directory tree once, then search file and folder names instantly")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory holding the config, snapshot and results files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log debug information to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build or rebuild the index
    Index {
        /// Root directory to index (defaults to the configured root)
        path: Option<PathBuf>,

        /// Do not show a spinner while walking
        #[arg(short, long)]
        quiet: bool,
    },
    /// Search the stored index
    Search {
        /// Term to look for (empty matches every name)
        #[arg(default_value = "")]
        term: String,

        /// How names are compared with the term
        #[arg(short, long, value_enum, default_value_t = MatchMode::Contains)]
        mode: MatchMode,

        /// Search folder names instead of file names
        #[arg(short, long)]
        folders: bool,
    },
    /// Open a match of the last search with its default application
    Open {
        /// Match number as printed by the last search (starting at 0)
        #[arg(allow_hyphen_values = true)]
        position: String,
    },
    /// Show index statistics
    Stats,
    /// Remove the stored index and results
    Clean,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let config = AppConfig::load_or_create(&data_dir)?;
    let paths = config.index_paths(&data_dir);
    let mut engine = IndexEngine::new(paths.clone());

    match cli.command {
        Some(Commands::Index { path, quiet }) => {
            let root = path.unwrap_or_else(|| config.default_root.clone());
            let spinner = (!quiet).then(|| WalkSpinner::new(&root));

            let report = engine.build_index_with_progress(&root, |visited| {
                if let Some(spinner) = &spinner {
                    spinner.directories(visited);
                }
            });
            if let Some(spinner) = &spinner {
                spinner.clear();
            }

            let report = report.with_context(|| format!("Failed to index {}", root.display()))?;
            shell::write_build_report(&mut io::stdout(), &report)?;
            println!("Index stored at: {}", paths.snapshot.display());
        }
        Some(Commands::Search {
            term,
            mode,
            folders,
        }) => {
            match engine.load_index() {
                LoadStatus::Loaded { .. } => {}
                LoadStatus::Missing => {
                    eprintln!("No index yet. Run 'findex index [ROOT]' first.");
                }
                LoadStatus::Corrupt { reason } => {
                    anyhow::bail!("Stored index is corrupt ({}); rebuild it with 'findex index'", reason);
                }
                LoadStatus::Unreadable { reason } => {
                    anyhow::bail!("Stored index could not be read: {}", reason);
                }
            }

            let target = if folders { Target::Folders } else { Target::Files };
            let spec = QuerySpec::new(term, mode, target);
            let result = engine.search(&spec);
            print_matches(result, &spec, !cli.no_color)?;
        }
        Some(Commands::Open { position }) => {
            let position = parse_position(&position)?;
            let previous = read_results_file(engine.results_path())
                .context("Failed to read the last search results")?;
            if let Some(paths) = previous {
                engine.restore_results(paths);
            }

            let opened = engine.open_match(position)?;
            println!("Opened {}", opened);
        }
        Some(Commands::Stats) => {
            let stats = SnapshotStats::collect(engine.store())?;
            print!("{}", stats);
        }
        Some(Commands::Clean) => {
            engine.store().remove()?;
            if engine.results_path().exists() {
                std::fs::remove_file(engine.results_path())
                    .context("Failed to remove results file")?;
            }
            println!("Removed index data in {}", data_dir.display());
        }
        None => {
            let choice = if cli.no_color {
                ColorChoice::Never
            } else {
                ColorChoice::Auto
            };
            let mut stdout = StandardStream::stdout(choice);
            let stdin = io::stdin();
            shell::run(&mut engine, &config.default_root, stdin.lock(), &mut stdout)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
