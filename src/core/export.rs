// LogExplorer - core/export.rs
//
// Session export: bundle the filtered text, optionally the raw text, and a
// session.json metadata record into a single in-memory ZIP archive.
//
// Archive layout:
//   filtered_log.txt          always; the filtered text byte-for-byte
//   raw_log.txt | .txt.gz     only when include_raw and the raw text is non-empty
//   session.json              always; options + export timestamp (UTC)
//
// Nothing touches the filesystem. Every buffer is an owned value, so all of
// them are released on both the success and the error path.

use crate::core::model::{ExportRequest, SessionInfo};
use crate::util::constants::{
    ARCHIVE_DOWNLOAD_PREFIX, ARCHIVE_TIMESTAMP_FORMAT, FILTERED_MEMBER, RAW_MEMBER, RAW_MEMBER_GZ,
    SESSION_MEMBER,
};
use crate::util::error::ExportError;
use chrono::{DateTime, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Build the session archive, stamping it with the current time.
pub fn export_session(request: &ExportRequest) -> Result<Vec<u8>, ExportError> {
    build_archive(request, Utc::now())
}

/// Build the session archive with an explicit export timestamp.
pub fn build_archive(
    request: &ExportRequest,
    exported_at: DateTime<Utc>,
) -> Result<Vec<u8>, ExportError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let deflated = CompressionMethod::Deflated;

    let filtered = request.filtered_log.as_deref().unwrap_or_default();
    write_member(&mut zip, FILTERED_MEMBER, deflated, filtered.as_bytes())?;

    let raw = request
        .raw_log
        .as_deref()
        .filter(|raw| request.include_raw && !raw.is_empty());
    if let Some(raw) = raw {
        if request.compress_raw {
            let gz = gzip(raw.as_bytes())?;
            // Gzip output does not shrink further.
            write_member(&mut zip, RAW_MEMBER_GZ, CompressionMethod::Stored, &gz)?;
        } else {
            write_member(&mut zip, RAW_MEMBER, deflated, raw.as_bytes())?;
        }
    }

    let session = SessionInfo::capture(request, exported_at);
    let json =
        serde_json::to_vec_pretty(&session).map_err(|source| ExportError::Json { source })?;
    write_member(&mut zip, SESSION_MEMBER, deflated, &json)?;

    let bytes = zip
        .finish()
        .map_err(|source| ExportError::Zip {
            member: SESSION_MEMBER,
            source,
        })?
        .into_inner();

    tracing::info!(
        file = request.file_name.as_deref().unwrap_or(""),
        filtered_bytes = filtered.len(),
        raw_included = raw.is_some(),
        compress_raw = request.compress_raw,
        archive_bytes = bytes.len(),
        "Session archive built"
    );
    Ok(bytes)
}

fn write_member(
    zip: &mut ZipWriter<Cursor<Vec<u8>>>,
    member: &'static str,
    method: CompressionMethod,
    bytes: &[u8],
) -> Result<(), ExportError> {
    let options = SimpleFileOptions::default().compression_method(method);
    zip.start_file(member, options)
        .map_err(|source| ExportError::Zip { member, source })?;
    zip.write_all(bytes)
        .map_err(|source| ExportError::Io { member, source })
}

fn gzip(bytes: &[u8]) -> Result<Vec<u8>, ExportError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(bytes)
        .map_err(|source| ExportError::Compress { source })?;
    encoder
        .finish()
        .map_err(|source| ExportError::Compress { source })
}

/// Download name for a saved single text payload: `<prefix><file>`.
///
/// Only the final path component of `file` is used. Falls back to `log` when
/// no file is selected.
pub fn download_file_name(prefix: &str, file: Option<&str>) -> String {
    let file = file
        .and_then(|f| Path::new(f).file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("log");
    format!("{prefix}{file}")
}

/// Download name for a session archive:
/// `LogSession_<file stem>_<yyyyMMdd_HHmmss>.zip`.
pub fn archive_file_name(file: Option<&str>, exported_at: DateTime<Utc>) -> String {
    let stem = file
        .and_then(|f| Path::new(f).file_stem())
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("log");
    format!(
        "{ARCHIVE_DOWNLOAD_PREFIX}{stem}_{}.zip",
        exported_at.format(ARCHIVE_TIMESTAMP_FORMAT)
    )
}
