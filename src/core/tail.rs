// LogExplorer - core/tail.rs
//
// Tail mode: keep only the last N lines of a file before grouping, so very
// large files stay cheap to view and the newest activity is what's shown.

/// Keep the last `limit` lines.
///
/// Only a positive limit smaller than the line count truncates; `None`,
/// zero, negative, or oversized limits return the lines unchanged. The
/// retained tail may begin mid-entry, in which case the grouper turns those
/// leading continuation lines into an untimestamped entry.
pub fn tail_lines(mut lines: Vec<String>, limit: Option<i64>) -> Vec<String> {
    let Some(limit) = limit.filter(|n| *n > 0) else {
        return lines;
    };
    let keep = usize::try_from(limit).unwrap_or(usize::MAX);
    if keep >= lines.len() {
        return lines;
    }
    let total = lines.len();
    tracing::debug!(total, keep, "Tail mode truncating lines");
    lines.split_off(total - keep)
}
