// LogExplorer - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogExplorer configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logexplorer/ or %APPDATA%\LogExplorer\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Full path of the default config file.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[logs]` section.
    pub logs: LogsSection,
    /// `[view]` section.
    pub view: ViewSection,
    /// `[export]` section.
    pub export: ExportSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[logs]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LogsSection {
    /// Directory holding the server's `.txt` logs.
    pub directory: Option<String>,
    /// File opened when none is named.
    pub default_file: Option<String>,
}

/// `[view]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ViewSection {
    /// Default tail size (0 = whole file).
    pub line_limit: Option<i64>,
}

/// `[export]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExportSection {
    pub include_raw: Option<bool>,
    pub compress_raw: Option<bool>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Log directory. `None` means the CLI must supply one.
    pub log_dir: Option<PathBuf>,
    /// Preferred file when none is named.
    pub default_file: String,
    /// Default tail size (0 = whole file).
    pub line_limit: i64,
    /// Default for including the raw log in exports.
    pub include_raw: bool,
    /// Default for gzip-compressing an included raw log.
    pub compress_raw: bool,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            default_file: constants::DEFAULT_LOG_FILE.to_string(),
            line_limit: constants::DEFAULT_LINE_LIMIT,
            include_raw: false,
            compress_raw: true,
            log_level: None,
        }
    }
}

/// Load and validate a config file.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// A missing file returns defaults with no warnings (first run). An unreadable
/// or unparseable file returns defaults with the error as a warning, so the
/// program still starts but the user is informed.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    let raw = match read_raw_config(config_path) {
        Ok(raw) => raw,
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            return (AppConfig::default(), vec![msg]);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");
    validate(raw)
}

fn read_raw_config(config_path: &Path) -> Result<RawConfig, ConfigError> {
    let content = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Io {
        path: config_path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: config_path.to_path_buf(),
        source,
    })
}

/// Validate each field against named constants, accumulating all warnings.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Logs: directory --
    if let Some(dir) = raw.logs.directory.filter(|d| !d.is_empty()) {
        config.log_dir = Some(PathBuf::from(dir));
    }

    // -- Logs: default_file --
    if let Some(file) = raw.logs.default_file {
        if file.is_empty() || file.contains(['/', '\\']) {
            warnings.push(format!(
                "[logs] default_file = \"{file}\" must be a bare file name. Using default ({}).",
                constants::DEFAULT_LOG_FILE,
            ));
        } else {
            config.default_file = file;
        }
    }

    // -- View: line_limit --
    if let Some(limit) = raw.view.line_limit {
        if (0..=constants::MAX_CONFIG_LINE_LIMIT).contains(&limit) {
            config.line_limit = limit;
        } else {
            warnings.push(
                ConfigError::ValueOutOfRange {
                    field: "[view] line_limit".to_string(),
                    value: limit.to_string(),
                    expected: format!(
                        "0-{}; using default ({})",
                        constants::MAX_CONFIG_LINE_LIMIT,
                        constants::DEFAULT_LINE_LIMIT
                    ),
                }
                .to_string(),
            );
        }
    }

    // -- Export --
    if let Some(include) = raw.export.include_raw {
        config.include_raw = include;
    }
    if let Some(compress) = raw.export.compress_raw {
        config.compress_raw = compress;
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}
