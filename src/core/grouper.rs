// LogExplorer - core/grouper.rs
//
// Segments a file's lines into logical multi-line entries.
//
// A line beginning with `yyyy-MM-dd HH:mm:ss.fff` opens a new entry; every
// other line continues the current one. Lines before the first timestamp form
// a leading entry of their own. Blank lines are removed by the reader before
// grouping and are never seen here.

use crate::core::model::LogEntry;
use regex::Regex;
use std::sync::OnceLock;

fn entry_start_regex() -> &'static Regex {
    static ENTRY_START: OnceLock<Regex> = OnceLock::new();
    ENTRY_START.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3}")
            .expect("grouper: invalid entry-start regex")
    })
}

/// True if `line` starts a new entry.
pub fn is_entry_start(line: &str) -> bool {
    entry_start_regex().is_match(line)
}

/// Group lines into entries, preserving file order.
pub fn group_entries<S: AsRef<str>>(lines: &[S]) -> Vec<LogEntry> {
    let mut entries = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in lines {
        let line = line.as_ref();
        if is_entry_start(line) && !current.is_empty() {
            entries.push(LogEntry::new(std::mem::take(&mut current)));
        }
        current.push(line.to_string());
    }

    if !current.is_empty() {
        entries.push(LogEntry::new(current));
    }

    tracing::trace!(
        lines = lines.len(),
        entries = entries.len(),
        "Grouped lines into entries"
    );
    entries
}

/// Join entries' texts with `separator` between consecutive entries.
pub fn join_entries<'a, I>(entries: I, separator: &str) -> String
where
    I: IntoIterator<Item = &'a LogEntry>,
{
    entries
        .into_iter()
        .map(LogEntry::text)
        .collect::<Vec<_>>()
        .join(separator)
}
