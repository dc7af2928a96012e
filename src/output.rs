//! Match list output: the results file mirror and numbered terminal listing

use crate::error::{Error, Result};
use crate::query::{MatchResult, QuerySpec};
use std::fs::{self, File};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::Path;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Overwrite `path` with the match list, one path per line
pub fn write_results_file(path: &Path, result: &MatchResult) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let broken = result.paths.iter().filter(|p| breaks_lines(p)).count();
    if broken > 0 {
        log::warn!(
            "{} matched paths contain line breaks; positions after them will not resolve from {}",
            broken,
            path.display()
        );
    }

    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);
    for matched in &result.paths {
        writeln!(writer, "{}", matched).map_err(|e| Error::io(path, e))?;
    }
    writer.flush().map_err(|e| Error::io(path, e))?;
    Ok(())
}

/// Read back a results file
///
/// Returns `None` when no search has written the file yet. An empty file is
/// the mirror of a search without matches and yields `Some` of no paths.
pub fn read_results_file(path: &Path) -> Result<Option<Vec<String>>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::io(path, e)),
    };
    Ok(Some(content.lines().map(str::to_string).collect()))
}

/// A path that cannot round-trip through the line-based results file
pub fn breaks_lines(path: &str) -> bool {
    path.contains(['\n', '\r'])
}

/// Print numbered matches followed by a summary line
pub fn print_matches(result: &MatchResult, spec: &QuerySpec, color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    write_matches(&mut stdout, result)?;
    write_summary(&mut stdout, result, spec)
}

/// Write `index: path` lines, with the matched name highlighted
pub fn write_matches<W: WriteColor>(out: &mut W, result: &MatchResult) -> io::Result<()> {
    let width = result.len().saturating_sub(1).to_string().len();

    for (idx, matched) in result.paths.iter().enumerate() {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{:>width$}", idx, width = width)?;
        out.reset()?;
        write!(out, ": ")?;

        let (dir, name) = split_name(matched);
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(out, "{}", dir)?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(out, "{}", name)?;
        out.reset()?;
        writeln!(out)?;
    }

    Ok(())
}

/// Write the scanned/matched counters for a query
pub fn write_summary<W: WriteColor>(
    out: &mut W,
    result: &MatchResult,
    spec: &QuerySpec,
) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_bold(true))?;
    write!(out, "{} {}", result.num_matches, plural(result.num_matches, "match", "matches"))?;
    out.reset()?;
    writeln!(
        out,
        " ({} {} scanned, {} {:?})",
        result.num_scanned,
        spec.target,
        spec.mode,
        spec.term
    )
}

/// Split a matched path into its directory prefix (with separator) and name
fn split_name(path: &str) -> (&str, &str) {
    match path.rfind(std::path::is_separator) {
        Some(idx) => path.split_at(idx + 1),
        None => ("", path),
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}
