//! Service ports: traits + data contracts.

pub mod settings;
pub mod storage;

pub use settings::WorkspaceSettings;
pub use storage::{EntryKind, Result as StorageResult, StorageError, WorkspaceStorage};
