// LogExplorer - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: platform, app, or any file-system I/O.

pub mod export;
pub mod filter;
pub mod grouper;
pub mod model;
pub mod scanner;
pub mod tail;
