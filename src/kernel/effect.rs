use crate::kernel::action::LoadReason;
use crate::kernel::services::ports::EntryKind;
use crate::kernel::state::ContentKind;
use std::path::PathBuf;

/// Work the store wants done outside itself. Results come back as actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadTree {
        request: u64,
        path: PathBuf,
        max_depth: u32,
    },
    LoadContent {
        path: PathBuf,
        kind: ContentKind,
        reason: LoadReason,
    },
    WriteFile {
        path: PathBuf,
        content: String,
    },
    CreateEntry {
        path: PathBuf,
        kind: EntryKind,
    },
    DeleteEntry {
        path: PathBuf,
    },
    RenameOrMove {
        from: PathBuf,
        to: PathBuf,
    },
    Watch {
        path: PathBuf,
    },
    Unwatch {
        path: PathBuf,
    },
    /// A tree entry was dropped outside the tree: attach it elsewhere.
    AttachPath {
        path: PathBuf,
    },
    /// A guarded external navigation may proceed.
    NavigationReleased {
        target: String,
    },
}
