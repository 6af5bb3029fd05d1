// LogExplorer - core/scanner.rs
//
// Discovers plugin display names from host startup lines such as
//   2024-01-01 00:00:00.000 Info App: Loading Trakt, Version=3.1.0.0, ...
// The names feed the `plugin:<name>` preset vocabulary.
//
// Operates on the raw, ungrouped lines of a file and is independent of the
// grouper and filter.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn plugin_load_regex() -> &'static Regex {
    static PLUGIN_LOAD: OnceLock<Regex> = OnceLock::new();
    PLUGIN_LOAD.get_or_init(|| {
        Regex::new(r"(?i)Info\s+App:\s+Loading\s+([^,]+),\s+Version=")
            .expect("scanner: invalid plugin-load regex")
    })
}

/// Extract the plugin name from a single line, if it is a plugin-load line.
pub fn plugin_name(line: &str) -> Option<&str> {
    plugin_load_regex()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|name| !name.is_empty())
}

/// Collect distinct plugin names, sorted.
///
/// Names are deduplicated case-insensitively; the spelling seen first wins.
/// Ordering ignores case, with the exact spelling breaking ties.
pub fn scan_plugin_names<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names: Vec<String> = Vec::new();

    for line in lines {
        if let Some(name) = plugin_name(line.as_ref()) {
            if seen.insert(name.to_lowercase()) {
                names.push(name.to_string());
            }
        }
    }

    names.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    tracing::debug!(plugins = names.len(), "Plugin scan complete");
    names
}
