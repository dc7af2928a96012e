//! Line-oriented interactive session that keeps one engine alive

use findex::engine::{IndexEngine, Request, Response, parse_position};
use findex::index::{BuildReport, LoadStatus, SnapshotStats};
use findex::output::{write_matches, write_summary};
use findex::query::{QuerySpec, parse_query};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use termcolor::{Color, ColorSpec, WriteColor};

const HELP: &str = "\
Commands:
  index [ROOT]                 Build the index (default root from config)
  search [mode:M] [type:T] TERM
                               M = contains | starts | ends, T = file | folder
  open N                       Open match N of the last search
  stats                        Show index statistics
  help                         Show this help
  quit                         Leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Run(Request),
    Stats,
    Help,
    Quit,
    Empty,
}

fn parse_line(line: &str, default_root: &Path) -> Result<ShellCommand, String> {
    let line = line.trim_start();
    let (word, rest) = match line.find(char::is_whitespace) {
        Some(idx) => (&line[..idx], &line[idx..]),
        None => (line, ""),
    };

    match word {
        "" => Ok(ShellCommand::Empty),
        "index" | "reindex" => {
            let rest = rest.trim();
            let root = if rest.is_empty() {
                default_root.to_path_buf()
            } else {
                PathBuf::from(rest)
            };
            Ok(ShellCommand::Run(Request::Build(root)))
        }
        "search" | "s" => Ok(ShellCommand::Run(Request::Search(parse_query(rest)))),
        "open" | "o" => parse_position(rest)
            .map(|n| ShellCommand::Run(Request::Open(n)))
            .map_err(|e| e.to_string()),
        "stats" => Ok(ShellCommand::Stats),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        other => Err(format!("unknown command: {} (try 'help')", other)),
    }
}

/// Run the session until `quit` or end of input
pub fn run<R: BufRead, W: WriteColor>(
    engine: &mut IndexEngine,
    default_root: &Path,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    match engine.load_index() {
        LoadStatus::Loaded { entries } => {
            writeln!(out, "Loaded index with {} directories.", entries)?
        }
        LoadStatus::Missing => writeln!(out, "No index yet. Run 'index [ROOT]' to build one.")?,
        LoadStatus::Corrupt { reason } => {
            write_error(out, &format!("stored index is corrupt ({}); rebuild it", reason))?
        }
        LoadStatus::Unreadable { reason } => {
            write_error(out, &format!("stored index could not be read: {}", reason))?
        }
    }

    let mut lines = input.lines();
    loop {
        write!(out, "findex> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            return Ok(());
        };
        let line = line?;

        let command = match parse_line(&line, default_root) {
            Ok(command) => command,
            Err(message) => {
                write_error(out, &message)?;
                continue;
            }
        };

        match command {
            ShellCommand::Empty => {}
            ShellCommand::Help => writeln!(out, "{}", HELP)?,
            ShellCommand::Quit => return Ok(()),
            ShellCommand::Stats => match SnapshotStats::collect(engine.store()) {
                Ok(stats) => write!(out, "{}", stats)?,
                Err(err) => write_error(out, &err.to_string())?,
            },
            ShellCommand::Run(request) => {
                let spec = match &request {
                    Request::Search(spec) => Some(spec.clone()),
                    _ => None,
                };
                match engine.handle(request) {
                    Ok(response) => write_response(out, response, spec.as_ref())?,
                    Err(err) => write_error(out, &err.to_string())?,
                }
            }
        }
    }
}

fn write_response<W: WriteColor>(
    out: &mut W,
    response: Response,
    spec: Option<&QuerySpec>,
) -> io::Result<()> {
    match response {
        Response::Built(report) => write_build_report(out, &report),
        Response::Matches(result) => {
            write_matches(out, &result)?;
            match spec {
                Some(spec) => write_summary(out, &result, spec),
                None => Ok(()),
            }
        }
        Response::Opened(path) => writeln!(out, "Opened {}", path),
    }
}

pub fn write_build_report<W: Write>(out: &mut W, report: &BuildReport) -> io::Result<()> {
    writeln!(
        out,
        "Indexed {}: {} directories with files ({} files, {} folders)",
        report.root.display(),
        report.entries,
        report.files,
        report.folders
    )?;
    if report.skipped > 0 {
        writeln!(out, "({} directories could not be read)", report.skipped)?;
    }
    Ok(())
}

fn write_error<W: WriteColor>(out: &mut W, message: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    write!(out, "error")?;
    out.reset()?;
    writeln!(out, ": {}", message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use findex::error::SelectionError;
    use findex::query::{MatchMode, Target};
    use findex::utils::IndexPaths;
    use std::fs::{self, File};
    use tempfile::TempDir;
    use termcolor::NoColor;

    #[test]
    fn test_parse_commands() {
        let root = Path::new("/default");

        assert_eq!(parse_line("   ", root), Ok(ShellCommand::Empty));
        assert_eq!(
            parse_line("index", root),
            Ok(ShellCommand::Run(Request::Build(PathBuf::from("/default"))))
        );
        assert_eq!(
            parse_line("index /srv/My Files", root),
            Ok(ShellCommand::Run(Request::Build(PathBuf::from("/srv/My Files"))))
        );
        assert_eq!(
            parse_line("search mode:ends type:folder src", root),
            Ok(ShellCommand::Run(Request::Search(QuerySpec::new(
                "src",
                MatchMode::EndsWith,
                Target::Folders
            ))))
        );
        assert_eq!(
            parse_line("open 4", root),
            Ok(ShellCommand::Run(Request::Open(4)))
        );
        assert_eq!(parse_line("quit", root), Ok(ShellCommand::Quit));
    }

    #[test]
    fn test_parse_open_errors() {
        let root = Path::new("/");
        assert_eq!(
            parse_line("open", root),
            Err(SelectionError::NothingSelected.to_string())
        );
        assert_eq!(
            parse_line("open x", root),
            Err(SelectionError::NotANumber("x".to_string()).to_string())
        );
        assert!(parse_line("frobnicate", root).is_err());
    }

    #[test]
    fn test_session_build_and_search() {
        let data = TempDir::new().unwrap();
        let tree = TempDir::new().unwrap();
        File::create(tree.path().join("a.txt")).unwrap();
        fs::create_dir(tree.path().join("sub")).unwrap();
        File::create(tree.path().join("sub/b.txt")).unwrap();

        let mut engine = IndexEngine::new(IndexPaths::in_dir(data.path()));
        let script = "index\nsearch b\nopen 7\nbogus\nquit\nsearch never\n";
        let mut out = NoColor::new(Vec::new());

        run(&mut engine, tree.path(), script.as_bytes(), &mut out).unwrap();

        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.contains("No index yet."));
        assert!(text.contains("2 directories with files (2 files, 1 folders)"));
        assert!(text.contains("0: "));
        assert!(text.contains("1 match (2 files scanned, contains \"b\")"));
        assert!(text.contains("error: match 7 is out of range (1 matches)"));
        assert!(text.contains("error: unknown command: bogus"));
        assert!(!text.contains("\"never\""));
    }
}
