//! Reading and writing line-oriented artifact files.
//!
//! Files are plain UTF-8 text with one artifact line per file line. Trailing
//! whitespace is dropped on read and each line is terminated by a single `\n`
//! on write, so a sequence without trailing whitespace survives a round trip.

use crate::error::{CheckError, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{Level, debug, span};

/// An artifact: an ordered sequence of lines without terminators.
pub type Lines = Vec<String>;

/// Reads `path` and returns its lines with trailing whitespace stripped.
///
/// # Errors
///
/// Returns [`CheckError::Configuration`] if the file does not exist, since the
/// caller explicitly asked for it, and [`CheckError::Io`] for any other failure.
pub fn read_lines(path: &Path) -> Result<Lines> {
    let span = span!(Level::DEBUG, "read_lines", path = %path.display());
    let _guard = span.enter();

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            CheckError::Configuration(format!(
                "Unable to read from inputfile '{}': file not found",
                path.display()
            ))
        } else {
            CheckError::io(path, e)
        }
    })?;

    let lines: Lines = content
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect();

    debug!(count = lines.len(), "Read reference lines");
    Ok(lines)
}

/// Overwrites `path` with `lines`, each followed by `\n`.
///
/// An empty sequence produces an empty file. A failure part-way through can
/// leave a truncated file behind; see [`write_lines_atomic`].
///
/// # Errors
///
/// Returns [`CheckError::Io`] if the file cannot be created or written.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let span = span!(Level::DEBUG, "write_lines", path = %path.display());
    let _guard = span.enter();

    let file = File::create(path).map_err(|e| CheckError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_all_lines(&mut writer, lines).map_err(|e| CheckError::io(path, e))?;

    debug!(count = lines.len(), "Wrote artifact lines");
    Ok(())
}

/// Like [`write_lines`], but writes to a temporary file in the same directory
/// and renames it over `path`, so readers never observe a partial file.
///
/// # Errors
///
/// Returns [`CheckError::Io`] if the temporary file cannot be created, written
/// or renamed into place.
pub fn write_lines_atomic(path: &Path, lines: &[String]) -> Result<()> {
    let span = span!(Level::DEBUG, "write_lines_atomic", path = %path.display());
    let _guard = span.enter();

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| CheckError::io(dir, e))?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write_all_lines(&mut writer, lines).map_err(|e| CheckError::io(path, e))?;
    }
    temp.persist(path)
        .map_err(|e| CheckError::io(path, e.error))?;

    debug!(count = lines.len(), "Atomically replaced artifact");
    Ok(())
}

fn write_all_lines<W: Write>(writer: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}
