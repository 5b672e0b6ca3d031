//! Local filesystem storage backend.

pub mod local;

pub use local::{mime_for_path, LocalStorage};
