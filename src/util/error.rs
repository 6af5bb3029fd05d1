// LogExplorer - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.
//
// Reading a log file never produces one of these: read failures degrade to a
// synthetic diagnostic line (see platform::fs). Errors here cover directory
// listing, archive construction, and configuration.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogExplorer operations.
#[derive(Debug)]
pub enum LogExplorerError {
    /// Log directory listing failed.
    Directory(DirectoryError),

    /// Export archive construction failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for LogExplorerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory(e) => write!(f, "Log directory error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for LogExplorerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Directory(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Directory errors
// ---------------------------------------------------------------------------

/// Errors related to listing the log directory.
#[derive(Debug)]
pub enum DirectoryError {
    /// The log directory does not exist.
    NotFound { path: PathBuf },

    /// The log directory path is not a directory.
    NotADirectory { path: PathBuf },

    /// Reading the directory failed.
    Io { path: PathBuf, source: io::Error },

    /// The file-name glob could not be compiled.
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "Log directory '{}' does not exist", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "Log path '{}' is not a directory", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Cannot read log directory '{}': {source}", path.display())
            }
            Self::InvalidPattern { pattern, source } => {
                write!(f, "Invalid log file pattern '{pattern}': {source}")
            }
        }
    }
}

impl std::error::Error for DirectoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidPattern { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DirectoryError> for LogExplorerError {
    fn from(e: DirectoryError) -> Self {
        Self::Directory(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to building a session export archive.
#[derive(Debug)]
pub enum ExportError {
    /// The ZIP writer rejected a member or failed to finish.
    Zip {
        member: &'static str,
        source: zip::result::ZipError,
    },

    /// Gzip compression of the raw log failed.
    Compress { source: io::Error },

    /// Session metadata could not be serialised.
    Json { source: serde_json::Error },

    /// Writing member bytes into the archive failed.
    Io {
        member: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zip { member, source } => {
                write!(f, "Archive error writing '{member}': {source}")
            }
            Self::Compress { source } => write!(f, "Gzip compression failed: {source}"),
            Self::Json { source } => {
                write!(f, "Session metadata serialisation failed: {source}")
            }
            Self::Io { member, source } => {
                write!(f, "I/O error writing archive member '{member}': {source}")
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Zip { source, .. } => Some(source),
            Self::Compress { source } => Some(source),
            Self::Json { source } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for LogExplorerError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LogExplorerError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for LogExplorer results.
pub type Result<T> = std::result::Result<T, LogExplorerError>;
