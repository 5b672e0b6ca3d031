//! workspace-sync: a headless workspace browser core.
//!
//! Module layout:
//! - kernel: state/action/effect store plus service ports and adapters
//! - models: the file tree snapshot and geometry types
//! - app: host loop wiring the store to storage, the watcher and drag input

pub mod app;
pub mod kernel;
pub mod models;
