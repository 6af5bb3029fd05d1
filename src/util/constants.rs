// LogExplorer - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogExplorer";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogExplorer";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prefix on every diagnostic string returned in place of log content.
pub const DIAGNOSTIC_MARKER: &str = "[LogExplorer]";

// =============================================================================
// Log directory
// =============================================================================

/// Glob matched against bare file names when listing the log directory.
pub const LOG_FILE_PATTERN: &str = "*.txt";

/// File preferred by `view`/`export` when no file is named and no default is
/// configured. Falls back to the newest listed file when absent.
pub const DEFAULT_LOG_FILE: &str = "embyserver.txt";

// =============================================================================
// Entry formatting
// =============================================================================

/// Separator between the lines of one entry, and between entries in raw text.
pub const LINE_SEPARATOR: &str = "\n";

/// Separator between entries in filtered text (one blank line).
pub const FILTERED_ENTRY_SEPARATOR: &str = "\n\n";

// =============================================================================
// Tail mode
// =============================================================================

/// Default tail size. 0 means the whole file.
pub const DEFAULT_LINE_LIMIT: i64 = 0;

/// Hard upper bound on a configured default tail size.
pub const MAX_CONFIG_LINE_LIMIT: i64 = 10_000_000;

// =============================================================================
// Export archive
// =============================================================================

/// Archive member holding the filtered text.
pub const FILTERED_MEMBER: &str = "filtered_log.txt";

/// Archive member holding the uncompressed raw text.
pub const RAW_MEMBER: &str = "raw_log.txt";

/// Archive member holding the gzip-compressed raw text.
pub const RAW_MEMBER_GZ: &str = "raw_log.txt.gz";

/// Archive member holding the session metadata record.
pub const SESSION_MEMBER: &str = "session.json";

/// Download-name prefix for a saved filtered log.
pub const FILTERED_DOWNLOAD_PREFIX: &str = "Filtered_";

/// Download-name prefix for a saved raw log.
pub const RAW_DOWNLOAD_PREFIX: &str = "RawLog_";

/// Download-name prefix for a session archive.
pub const ARCHIVE_DOWNLOAD_PREFIX: &str = "LogSession_";

/// chrono format for the timestamp embedded in archive download names.
pub const ARCHIVE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Accepted values for `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
