// LogExplorer - main.rs
//
// Command-line host for the log service. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. Dispatch to the service operations
//
// Command output goes to stdout; diagnostics go to stderr via tracing.

use clap::{Args, Parser, Subcommand};
use logexplorer::app::service::LogViewerService;
use logexplorer::core::export::archive_file_name;
use logexplorer::core::model::{ExportRequest, LogContentRequest};
use logexplorer::platform::config::{self, AppConfig, PlatformPaths};
use logexplorer::util;
use std::io::Write;
use std::path::PathBuf;

/// LogExplorer - browse, filter, and export server log files.
#[derive(Parser, Debug)]
#[command(name = "logexplorer", version, about)]
struct Cli {
    /// Log directory (overrides [logs] directory in config.toml).
    #[arg(short = 'l', long = "log-dir", global = true)]
    log_dir: Option<PathBuf>,

    /// Config file (defaults to the platform config directory).
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List log files, newest-named first.
    List,

    /// List plugin names found in a log file (for --preset plugin:<name>).
    Plugins {
        /// Log file name within the log directory.
        file: String,
    },

    /// Print the filtered entries of a log file.
    View {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print the full grouped text instead of the filtered entries.
        #[arg(long)]
        raw: bool,

        /// Save the view to DIR (default: current directory) as
        /// Filtered_<file>, or RawLog_<file> with --raw, instead of printing it.
        #[arg(long, value_name = "DIR", num_args = 0..=1, default_missing_value = ".")]
        save: Option<PathBuf>,
    },

    /// Write a session archive (filtered log, optional raw log, session.json).
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Include the raw log in the archive.
        #[arg(long)]
        include_raw: bool,

        /// Store the raw log uncompressed.
        #[arg(long, conflicts_with = "compress_raw")]
        no_compress_raw: bool,

        /// Gzip-compress the raw log.
        #[arg(long)]
        compress_raw: bool,

        /// Record auto-refresh as enabled in session.json.
        #[arg(long)]
        auto_refresh: bool,

        /// Output path (defaults to LogSession_<file>_<timestamp>.zip).
        #[arg(short = 'O', long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Log file name (defaults to the configured default file, else the newest).
    file: Option<String>,

    /// First keyword.
    #[arg(short = 'k', long = "keyword1")]
    keyword1: Option<String>,

    /// Second keyword.
    #[arg(short = 'K', long = "keyword2")]
    keyword2: Option<String>,

    /// Keyword combinator: AND, OR, NOT, NONE.
    #[arg(short = 'o', long = "operator")]
    operator: Option<String>,

    /// Preset: exception, playback, transcode, network, library, metadata, plugin:<name>.
    #[arg(short = 'p', long = "preset")]
    preset: Option<String>,

    /// Only consider the last N lines of the file (0 = whole file).
    #[arg(short = 'n', long = "lines")]
    lines: Option<i64>,
}

fn main() {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_file());
    let (app_config, config_warnings) = config::load_config(&config_path);

    util::logging::init(cli.debug, app_config.log_level.as_deref());
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    tracing::debug!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "LogExplorer starting"
    );

    let Some(log_dir) = cli.log_dir.clone().or_else(|| app_config.log_dir.clone()) else {
        eprintln!("Error: no log directory. Pass --log-dir or set [logs] directory in config.toml.");
        std::process::exit(2);
    };

    let service = LogViewerService::new(log_dir);
    if let Err(e) = run(cli.command, &service, &app_config) {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Command, service: &LogViewerService, config: &AppConfig) -> util::error::Result<()> {
    let mut out = std::io::stdout().lock();
    let stdout_err = |source: std::io::Error| util::error::LogExplorerError::Io {
        path: PathBuf::from("<stdout>"),
        operation: "write",
        source,
    };

    match command {
        Command::List => {
            for name in service.list_logs()? {
                writeln!(out, "{name}").map_err(stdout_err)?;
            }
        }
        Command::Plugins { file } => {
            for name in service.plugin_filters(Some(&file)) {
                writeln!(out, "{name}").map_err(stdout_err)?;
            }
        }
        Command::View { filter, raw, save: Some(dir) } => {
            let request = content_request(filter, service, config);
            let path = service.save_view(&request, raw, &dir)?;
            writeln!(out, "{}", path.display()).map_err(stdout_err)?;
        }
        Command::View { filter, raw, save: None } => {
            let request = content_request(filter, service, config);
            let content = service.log_content(&request);
            let text = if raw {
                content.raw.unwrap_or(content.content)
            } else {
                content.content
            };
            writeln!(out, "{text}").map_err(stdout_err)?;
        }
        Command::Export {
            filter,
            include_raw,
            no_compress_raw,
            compress_raw,
            auto_refresh,
            output,
        } => {
            let request = content_request(filter, service, config);
            let content = service.log_content(&request);
            let export = ExportRequest {
                file_name: request.file.clone(),
                filtered_log: Some(content.content),
                raw_log: content.raw,
                keyword1: request.keyword1.clone(),
                keyword2: request.keyword2.clone(),
                operator: request.operator.clone(),
                preset: request.preset.clone(),
                line_limit: request.lines.unwrap_or(0),
                auto_refresh,
                include_raw: include_raw || config.include_raw,
                compress_raw: compress_raw || (config.compress_raw && !no_compress_raw),
            };
            let bytes = service.export_session(&export)?;
            let path = output.unwrap_or_else(|| {
                PathBuf::from(archive_file_name(
                    request.file.as_deref(),
                    chrono::Utc::now(),
                ))
            });
            std::fs::write(&path, &bytes).map_err(|source| util::error::LogExplorerError::Io {
                path: path.clone(),
                operation: "write archive",
                source,
            })?;
            tracing::info!(path = %path.display(), bytes = bytes.len(), "Archive written");
            writeln!(out, "{}", path.display()).map_err(stdout_err)?;
        }
    }
    Ok(())
}

/// Turn CLI filter flags into a content request, filling the file and the
/// tail size from config when they are not given.
fn content_request(
    args: FilterArgs,
    service: &LogViewerService,
    config: &AppConfig,
) -> LogContentRequest {
    let file = args.file.or_else(|| default_file(service, config));
    let lines = args
        .lines
        .or((config.line_limit > 0).then_some(config.line_limit));
    LogContentRequest {
        file,
        keyword1: args.keyword1,
        keyword2: args.keyword2,
        operator: args.operator,
        preset: args.preset,
        lines,
    }
}

/// The configured default file if present, otherwise the first listed file.
fn default_file(service: &LogViewerService, config: &AppConfig) -> Option<String> {
    let files = match service.list_logs() {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!(error = %e, "Could not list log directory");
            return None;
        }
    };
    if files.iter().any(|f| f == &config.default_file) {
        Some(config.default_file.clone())
    } else {
        files.into_iter().next()
    }
}
