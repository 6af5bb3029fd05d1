// LogExplorer - app/mod.rs
//
// Application layer: orchestration of reading, grouping, filtering, export.
// Dependencies: core and platform layers.

pub mod service;
