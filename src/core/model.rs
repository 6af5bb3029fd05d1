// LogExplorer - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no platform
// dependencies.
//
// Two families live here: the in-memory vocabulary used by grouping and
// filtering (LogEntry, Preset, Combinator, FilterSpec), and the wire shapes
// exchanged with a host (LogContentRequest, LogContent, ExportRequest,
// SessionInfo). Wire shapes use PascalCase JSON field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::util::constants::LINE_SEPARATOR;

// =============================================================================
// Log Entry
// =============================================================================

/// One logical log record: a timestamped first line plus any continuation
/// lines (stack frames, wrapped messages) that followed it in the file.
///
/// An entry at the very start of a file may have no timestamped line at all
/// if the file began mid-record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Physical lines in file order. Never empty, never contains blank lines.
    pub lines: Vec<String>,
}

impl LogEntry {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Newline-joined text of the entry, as used for filtering and display.
    pub fn text(&self) -> String {
        self.lines.join(LINE_SEPARATOR)
    }

    /// Number of physical lines in the entry.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// True if the first line carries the entry-start timestamp.
    pub fn has_timestamp(&self) -> bool {
        self.lines
            .first()
            .is_some_and(|l| crate::core::grouper::is_entry_start(l))
    }
}

// =============================================================================
// Preset
// =============================================================================

/// Wire prefix selecting a plugin-name preset.
pub const PLUGIN_PRESET_PREFIX: &str = "plugin:";

/// A named, predefined predicate over entry text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preset {
    Exception,
    Playback,
    Transcode,
    Network,
    Library,
    Metadata,
    /// `plugin:<name>`; the name is stored lower-cased.
    Plugin(String),
    /// Anything else. Filters nothing.
    Unrecognized(String),
}

impl Preset {
    /// Parse a wire preset value. Matching is case-insensitive.
    ///
    /// Returns `None` for an empty string, which means "no preset".
    pub fn parse(value: &str) -> Option<Self> {
        if value.is_empty() {
            return None;
        }
        let lower = value.to_lowercase();
        let preset = match lower.as_str() {
            "exception" => Self::Exception,
            "playback" => Self::Playback,
            "transcode" => Self::Transcode,
            "network" => Self::Network,
            "library" => Self::Library,
            "metadata" => Self::Metadata,
            other => match other.strip_prefix(PLUGIN_PRESET_PREFIX) {
                Some(name) => Self::Plugin(name.to_string()),
                None => Self::Unrecognized(other.to_string()),
            },
        };
        Some(preset)
    }

    /// Lower-cased substrings of which at least one must appear in an entry.
    ///
    /// An empty slice means the preset filters nothing.
    pub fn terms(&self) -> Vec<&str> {
        match self {
            Self::Exception => vec!["exception"],
            Self::Playback => vec!["playback"],
            Self::Transcode => vec!["transcode"],
            Self::Network => vec!["http", "socket", "network"],
            Self::Library => vec!["library"],
            Self::Metadata => vec!["provider", "metadata"],
            Self::Plugin(name) => vec![name.as_str()],
            Self::Unrecognized(_) => Vec::new(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exception => f.write_str("exception"),
            Self::Playback => f.write_str("playback"),
            Self::Transcode => f.write_str("transcode"),
            Self::Network => f.write_str("network"),
            Self::Library => f.write_str("library"),
            Self::Metadata => f.write_str("metadata"),
            Self::Plugin(name) => write!(f, "{PLUGIN_PRESET_PREFIX}{name}"),
            Self::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

// =============================================================================
// Combinator
// =============================================================================

/// Boolean operator joining the two keyword containment tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combinator {
    And,
    Or,
    Not,
    #[default]
    None,
}

impl Combinator {
    /// Parse a wire operator. Case-insensitive; anything unrecognised is `None`.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::to_uppercase).as_deref() {
            Some("AND") => Self::And,
            Some("OR") => Self::Or,
            Some("NOT") => Self::Not,
            _ => Self::None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::None => "NONE",
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// FilterSpec
// =============================================================================

/// Everything needed to turn a log file into its filtered view.
/// Built per request and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub preset: Option<Preset>,
    pub keyword1: String,
    pub keyword2: String,
    pub combinator: Combinator,
    /// Tail size. Only a positive value smaller than the file truncates.
    pub line_limit: Option<i64>,
}

impl FilterSpec {
    /// Build a spec from a wire request, applying the lenient parsing rules:
    /// absent keywords are empty, unknown operators are `None`.
    pub fn from_request(request: &LogContentRequest) -> Self {
        Self {
            preset: request.preset.as_deref().and_then(Preset::parse),
            keyword1: request.keyword1.clone().unwrap_or_default(),
            keyword2: request.keyword2.clone().unwrap_or_default(),
            combinator: Combinator::parse(request.operator.as_deref()),
            line_limit: request.lines,
        }
    }

    /// True when neither the preset stage nor the keyword stage is active.
    pub fn is_empty(&self) -> bool {
        self.preset.is_none() && self.keyword1.is_empty() && self.keyword2.is_empty()
    }
}

// =============================================================================
// Wire types
// =============================================================================

/// A request for the filtered and raw content of one log file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LogContentRequest {
    pub file: Option<String>,
    pub keyword1: Option<String>,
    pub keyword2: Option<String>,
    pub operator: Option<String>,
    pub preset: Option<String>,
    pub lines: Option<i64>,
}

/// Filtered display text plus the full grouped text of the (tailed) file.
///
/// `raw` is `None` when the file could not be located at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogContent {
    pub content: String,
    pub raw: Option<String>,
}

/// A request to bundle already-computed text into a session archive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ExportRequest {
    pub file_name: Option<String>,
    pub filtered_log: Option<String>,
    pub raw_log: Option<String>,
    pub keyword1: Option<String>,
    pub keyword2: Option<String>,
    pub operator: Option<String>,
    pub preset: Option<String>,
    pub line_limit: i64,
    pub auto_refresh: bool,
    pub include_raw: bool,
    pub compress_raw: bool,
}

/// The `session.json` record stored alongside the exported text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionInfo {
    pub file: Option<String>,
    pub keyword1: Option<String>,
    pub keyword2: Option<String>,
    pub operator: Option<String>,
    pub preset: Option<String>,
    pub line_limit: i64,
    pub auto_refresh: bool,
    pub include_raw: bool,
    pub compress_raw: bool,
    pub exported_at: DateTime<Utc>,
}

impl SessionInfo {
    /// Capture the options of an export request at `exported_at`.
    pub fn capture(request: &ExportRequest, exported_at: DateTime<Utc>) -> Self {
        Self {
            file: request.file_name.clone(),
            keyword1: request.keyword1.clone(),
            keyword2: request.keyword2.clone(),
            operator: request.operator.clone(),
            preset: request.preset.clone(),
            line_limit: request.line_limit,
            auto_refresh: request.auto_refresh,
            include_raw: request.include_raw,
            compress_raw: request.compress_raw,
            exported_at,
        }
    }
}
