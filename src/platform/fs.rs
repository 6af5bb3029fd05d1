// LogExplorer - platform/fs.rs
//
// Filesystem primitives for the log directory: list log files, resolve a
// client-supplied name safely, and read a file's non-blank lines while the
// server is still writing to it.
//
// Shared access: the file is opened read-only. On Windows, std opens files with
// FILE_SHARE_READ | FILE_SHARE_WRITE | FILE_SHARE_DELETE, so the log writer
// keeps its handle and may append (or rotate) during the read. Unix has no
// mandatory locking. A trailing partial line written mid-read is returned as
// it stood.

use crate::util::constants::{DIAGNOSTIC_MARKER, LOG_FILE_PATTERN};
use crate::util::error::DirectoryError;
use glob::{MatchOptions, Pattern};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Component, Path, PathBuf};

/// Read the non-blank lines of a log file.
///
/// Lines are decoded as UTF-8 (invalid sequences replaced) and split on `\n`,
/// `\r\n`, or a lone `\r`. Terminators are stripped and whitespace-only lines
/// dropped. Never fails: an I/O error
/// yields a single synthetic diagnostic line naming the file and the error, so
/// grouping and filtering still have something to run on.
pub fn read_log_lines(path: &Path) -> Vec<String> {
    match try_read_lines(path) {
        Ok(lines) => {
            tracing::debug!(path = %path.display(), lines = lines.len(), "Read log file");
            lines
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Could not read log file");
            vec![read_failure_line(path, &e)]
        }
    }
}

/// The synthetic line substituted for a file that could not be read.
pub fn read_failure_line(path: &Path, error: &io::Error) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    format!("{DIAGNOSTIC_MARKER} Could not read file {name}: {error}")
}

fn try_read_lines(path: &Path) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut lines = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let chunk = String::from_utf8_lossy(&buf);
        for line in chunk.trim_end_matches('\n').split('\r') {
            if !line.trim().is_empty() {
                lines.push(line.to_string());
            }
        }
    }
    Ok(lines)
}

/// List log file names in `dir`, newest-named first.
///
/// Only regular files whose name matches `*.txt` (case-insensitively) are
/// returned, as bare file names sorted in descending order.
pub fn list_log_files(dir: &Path) -> Result<Vec<String>, DirectoryError> {
    let metadata = match std::fs::metadata(dir) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(DirectoryError::NotFound {
                path: dir.to_path_buf(),
            })
        }
        Err(source) => {
            return Err(DirectoryError::Io {
                path: dir.to_path_buf(),
                source,
            })
        }
    };
    if !metadata.is_dir() {
        return Err(DirectoryError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let pattern =
        Pattern::new(LOG_FILE_PATTERN).map_err(|source| DirectoryError::InvalidPattern {
            pattern: LOG_FILE_PATTERN.to_string(),
            source,
        })?;
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::default()
    };

    let read_dir = std::fs::read_dir(dir).map_err(|source| DirectoryError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in read_dir {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if pattern.matches_with(&name, options) {
            names.push(name);
        }
    }

    names.sort_by(|a, b| b.cmp(a));
    tracing::debug!(dir = %dir.display(), files = names.len(), "Listed log files");
    Ok(names)
}

/// Resolve a client-supplied file name against the log directory.
///
/// Returns `None` if the name is not a single plain path component (rejecting
/// separators, `.`/`..`, and absolute paths) or if no regular file exists there.
pub fn resolve_log_file(dir: &Path, name: &str) -> Option<PathBuf> {
    if name.is_empty() || name.contains(['/', '\\']) {
        return None;
    }
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => {}
        _ => {
            tracing::warn!(name, "Rejected log file name outside the log directory");
            return None;
        }
    }
    let path = dir.join(name);
    path.is_file().then_some(path)
}
