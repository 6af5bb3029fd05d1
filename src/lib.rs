// LogExplorer - lib.rs
//
// Library entry point. A host (HTTP layer, plugin bridge) drives
// `app::service::LogViewerService`; the CLI in `main.rs` is one such host.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
