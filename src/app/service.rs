// LogExplorer - app/service.rs
//
// The four operations a host exposes to the log UI:
//   list_logs       log file names, newest-named first
//   plugin_filters  plugin names discovered in one file (for `plugin:` presets)
//   log_content     filtered + raw grouped text for one file and filter
//   export_session  session archive from client-supplied text and options
//
// `save_view` writes one view of `log_content` to disk under its download
// name (`Filtered_<file>` or `RawLog_<file>`).
//
// Stateless: the service holds only the log directory, and every call reads
// what it needs from disk. Missing input degrades to a diagnostic string in
// the returned content, never an error.

use crate::core::export;
use crate::core::filter::filter_entries;
use crate::core::grouper::{group_entries, join_entries};
use crate::core::model::{ExportRequest, FilterSpec, LogContent, LogContentRequest};
use crate::core::scanner::scan_plugin_names;
use crate::core::tail::tail_lines;
use crate::platform::fs;
use crate::util::constants::{
    DIAGNOSTIC_MARKER, FILTERED_DOWNLOAD_PREFIX, FILTERED_ENTRY_SEPARATOR, LINE_SEPARATOR,
    RAW_DOWNLOAD_PREFIX,
};
use crate::util::error::{LogExplorerError, Result};
use std::path::{Path, PathBuf};

/// Request/response boundary over one log directory.
#[derive(Debug, Clone)]
pub struct LogViewerService {
    log_dir: PathBuf,
}

impl LogViewerService {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
        }
    }

    /// Log file names in the directory, sorted descending.
    pub fn list_logs(&self) -> Result<Vec<String>> {
        Ok(fs::list_log_files(&self.log_dir)?)
    }

    /// Plugin names loaded according to `file`, sorted.
    ///
    /// Empty when no file is named or the file does not exist.
    pub fn plugin_filters(&self, file: Option<&str>) -> Vec<String> {
        let Some(path) = file
            .filter(|f| !f.is_empty())
            .and_then(|f| fs::resolve_log_file(&self.log_dir, f))
        else {
            return Vec::new();
        };
        scan_plugin_names(&fs::read_log_lines(&path))
    }

    /// Filtered and raw content of the requested file.
    ///
    /// Filtered entries are separated by a blank line; raw entries by a single
    /// newline. When the file cannot be located, `content` carries a
    /// diagnostic and `raw` is empty (no file named) or absent (not found).
    pub fn log_content(&self, request: &LogContentRequest) -> LogContent {
        let Some(file) = request.file.as_deref().filter(|f| !f.is_empty()) else {
            return LogContent {
                content: format!("{DIAGNOSTIC_MARKER} No file specified."),
                raw: Some(String::new()),
            };
        };
        let Some(path) = fs::resolve_log_file(&self.log_dir, file) else {
            tracing::info!(file, "Requested log file not found");
            return LogContent {
                content: format!("{DIAGNOSTIC_MARKER} Log file not found: {file}"),
                raw: None,
            };
        };

        let spec = FilterSpec::from_request(request);
        let lines = tail_lines(fs::read_log_lines(&path), spec.line_limit);
        let entries = group_entries(&lines);
        let filtered = filter_entries(&entries, &spec);

        tracing::info!(
            file,
            lines = lines.len(),
            entries = entries.len(),
            shown = filtered.len(),
            "Log content computed"
        );

        LogContent {
            content: join_entries(filtered, FILTERED_ENTRY_SEPARATOR),
            raw: Some(join_entries(&entries, LINE_SEPARATOR)),
        }
    }

    /// Build the downloadable session archive.
    pub fn export_session(&self, request: &ExportRequest) -> Result<Vec<u8>> {
        Ok(export::export_session(request)?)
    }

    /// Write the filtered text (or the raw text when `raw`) of `request` into
    /// `dest_dir` and return the written path.
    ///
    /// A diagnostic is saved as-is when the file cannot be located.
    pub fn save_view(
        &self,
        request: &LogContentRequest,
        raw: bool,
        dest_dir: &Path,
    ) -> Result<PathBuf> {
        let content = self.log_content(request);
        let (prefix, text) = if raw {
            (RAW_DOWNLOAD_PREFIX, content.raw.unwrap_or(content.content))
        } else {
            (FILTERED_DOWNLOAD_PREFIX, content.content)
        };
        let path = dest_dir.join(export::download_file_name(prefix, request.file.as_deref()));
        std::fs::write(&path, text.as_bytes()).map_err(|source| LogExplorerError::Io {
            path: path.clone(),
            operation: "save view",
            source,
        })?;
        tracing::info!(path = %path.display(), bytes = text.len(), raw, "View saved");
        Ok(path)
    }
}
