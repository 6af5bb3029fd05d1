// LogExplorer - tests/e2e_service.rs
//
// End-to-end tests for the service operations.
//
// These tests exercise the real filesystem (tempfile directories), the real
// line reader, grouper, filter, and ZIP/gzip archive writer. No mocks.

use flate2::read::GzDecoder;
use logexplorer::app::service::LogViewerService;
use logexplorer::core::model::{ExportRequest, LogContentRequest};
use std::fs;
use std::io::{Cursor, Read};
use tempfile::TempDir;
use zip::ZipArchive;

// =============================================================================
// Helpers
// =============================================================================

const SERVER_LOG: &str = "\
2024-01-01 00:00:00.000 Info App: Loading Trakt, Version=3.1.0.0, Name=Trakt
2024-01-01 00:00:00.100 Info App: Loading Emby.Webhooks, Version=1.2.0.0, Name=Webhooks

2024-01-01 00:00:01.000 Info HttpServer: HTTP GET /emby/System/Info. UserAgent: curl
2024-01-01 00:00:02.000 Error PlaybackManager: Playback failed: timeout waiting for stream
	*** Error Report ***
	System.TimeoutException: The operation has timed out.
   at Emby.Server.Implementations.Playback.Start()
2024-01-01 00:00:03.000 Warn LibraryMonitor: Library scan fail: access denied
2024-01-01 00:00:04.000 Info App: Loading trakt, Version=3.1.0.0, Name=Trakt
2024-01-01 00:00:05.000 Info TranscodeManager: Transcode started
";

fn setup() -> (TempDir, LogViewerService) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("embyserver.txt"), SERVER_LOG).unwrap();
    fs::write(dir.path().join("embyserver-63850000000.txt"), "old\n").unwrap();
    fs::write(dir.path().join("ffmpeg-transcode-1.log"), "not listed\n").unwrap();
    let service = LogViewerService::new(dir.path());
    (dir, service)
}

fn content_request(file: &str) -> LogContentRequest {
    LogContentRequest {
        file: Some(file.to_string()),
        ..Default::default()
    }
}

fn unzip(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).unwrap();
            let mut buf = Vec::new();
            file.read_to_end(&mut buf).unwrap();
            (file.name().to_string(), buf)
        })
        .collect()
}

// =============================================================================
// list_logs / plugin_filters
// =============================================================================

#[test]
fn e2e_list_logs_only_txt_descending() {
    let (_dir, service) = setup();
    assert_eq!(
        service.list_logs().unwrap(),
        vec![
            "embyserver.txt".to_string(),
            "embyserver-63850000000.txt".to_string()
        ]
    );
}

#[test]
fn e2e_plugin_filters_from_startup_lines() {
    let (_dir, service) = setup();
    assert_eq!(
        service.plugin_filters(Some("embyserver.txt")),
        vec!["Emby.Webhooks".to_string(), "Trakt".to_string()]
    );
}

#[test]
fn e2e_plugin_filters_reject_traversal() {
    let (dir, service) = setup();
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    let inner = LogViewerService::new(&nested);
    assert!(inner.plugin_filters(Some("../embyserver.txt")).is_empty());
    assert!(!service.plugin_filters(Some("embyserver.txt")).is_empty());
}

// =============================================================================
// log_content
// =============================================================================

#[test]
fn e2e_raw_text_groups_and_drops_blank_lines() {
    let (_dir, service) = setup();
    let content = service.log_content(&content_request("embyserver.txt"));
    let raw = content.raw.unwrap();

    assert!(!raw.contains("\n\n"), "blank lines must not survive");
    assert_eq!(raw.lines().count(), SERVER_LOG.lines().filter(|l| !l.trim().is_empty()).count());
    // No filter: filtered view holds the same entries, blank-line separated.
    assert_eq!(content.content.split("\n\n").count(), 7);
}

#[test]
fn e2e_network_preset() {
    let (_dir, service) = setup();
    let content = service.log_content(&LogContentRequest {
        preset: Some("network".to_string()),
        ..content_request("embyserver.txt")
    });
    assert_eq!(
        content.content,
        "2024-01-01 00:00:01.000 Info HttpServer: HTTP GET /emby/System/Info. UserAgent: curl"
    );
}

#[test]
fn e2e_not_combinator_keeps_multiline_entry_intact() {
    let (_dir, service) = setup();
    let content = service.log_content(&LogContentRequest {
        keyword1: Some("fail".to_string()),
        keyword2: Some("timeout".to_string()),
        operator: Some("not".to_string()),
        ..content_request("embyserver.txt")
    });
    assert_eq!(
        content.content,
        "2024-01-01 00:00:03.000 Warn LibraryMonitor: Library scan fail: access denied"
    );
}

#[test]
fn e2e_exception_preset_matches_stack_trace_line() {
    let (_dir, service) = setup();
    let content = service.log_content(&LogContentRequest {
        preset: Some("Exception".to_string()),
        ..content_request("embyserver.txt")
    });
    assert!(content.content.starts_with("2024-01-01 00:00:02.000 Error PlaybackManager"));
    assert!(content.content.ends_with("at Emby.Server.Implementations.Playback.Start()"));
    assert_eq!(content.content.lines().count(), 4);
}

#[test]
fn e2e_plugin_preset_round_trip() {
    let (_dir, service) = setup();
    let plugins = service.plugin_filters(Some("embyserver.txt"));
    let content = service.log_content(&LogContentRequest {
        preset: Some(format!("plugin:{}", plugins[1])),
        ..content_request("embyserver.txt")
    });
    assert_eq!(content.content.split("\n\n").count(), 2);
}

#[test]
fn e2e_tail_mode_limits_lines_before_grouping() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("five.txt"),
        "2024-01-01 00:00:00.000 one\n2024-01-01 00:00:01.000 two\n2024-01-01 00:00:02.000 three\n  at Three()\n2024-01-01 00:00:03.000 four\n",
    )
    .unwrap();
    let service = LogViewerService::new(dir.path());

    let content = service.log_content(&LogContentRequest {
        lines: Some(2),
        ..content_request("five.txt")
    });
    assert_eq!(content.raw.as_deref(), Some("  at Three()\n2024-01-01 00:00:03.000 four"));

    let whole = service.log_content(&LogContentRequest {
        lines: Some(0),
        ..content_request("five.txt")
    });
    assert_eq!(whole.raw.unwrap().lines().count(), 5);
}

#[test]
fn e2e_missing_file_diagnostic() {
    let (_dir, service) = setup();
    let content = service.log_content(&content_request("nope.txt"));
    assert_eq!(content.content, "[LogExplorer] Log file not found: nope.txt");
    assert!(content.raw.is_none());
}

// =============================================================================
// export_session
// =============================================================================

#[test]
fn e2e_export_compressed_raw() {
    let (_dir, service) = setup();
    let request = ExportRequest {
        file_name: Some("embyserver.txt".to_string()),
        filtered_log: Some("filtered text".to_string()),
        raw_log: Some("hello".to_string()),
        include_raw: true,
        compress_raw: true,
        ..Default::default()
    };
    let members = unzip(&service.export_session(&request).unwrap());
    let names: Vec<&str> = members.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["filtered_log.txt", "raw_log.txt.gz", "session.json"]);

    let mut decoded = String::new();
    GzDecoder::new(members[1].1.as_slice())
        .read_to_string(&mut decoded)
        .unwrap();
    assert_eq!(decoded, "hello");
}

#[test]
fn e2e_export_from_computed_content() {
    let (_dir, service) = setup();
    let content = service.log_content(&LogContentRequest {
        preset: Some("playback".to_string()),
        ..content_request("embyserver.txt")
    });
    let request = ExportRequest {
        file_name: Some("embyserver.txt".to_string()),
        filtered_log: Some(content.content.clone()),
        raw_log: content.raw.clone(),
        preset: Some("playback".to_string()),
        include_raw: true,
        ..Default::default()
    };
    let members = unzip(&service.export_session(&request).unwrap());

    assert_eq!(members[0].1, content.content.into_bytes());
    assert_eq!(members[1].0, "raw_log.txt");
    assert_eq!(members[1].1, content.raw.unwrap().into_bytes());

    let session: serde_json::Value = serde_json::from_slice(&members[2].1).unwrap();
    assert_eq!(session["Preset"], "playback");
    assert_eq!(session["IncludeRaw"], true);
    assert!(session["ExportedAt"].as_str().unwrap().ends_with('Z'));
}
