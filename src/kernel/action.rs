use std::path::PathBuf;
use std::time::Instant;

use crate::kernel::changes::ChangeKind;
use crate::kernel::drag::DropResolution;
use crate::kernel::services::ports::EntryKind;
use crate::kernel::state::PreviewMode;
use crate::models::FileNode;

/// Why a content read was issued; decides whether its result may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadReason {
    Open,
    Reload,
}

/// A completed (or failed) structural filesystem operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsOp {
    Create { path: PathBuf, kind: EntryKind },
    Delete { path: PathBuf },
    Rename { from: PathBuf, to: PathBuf },
}

impl FsOp {
    pub fn name(&self) -> &'static str {
        match self {
            FsOp::Create { .. } => "create_entry",
            FsOp::Delete { .. } => "delete_entry",
            FsOp::Rename { .. } => "rename_or_move",
        }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            FsOp::Create { path, .. } | FsOp::Delete { path } => path,
            FsOp::Rename { from, .. } => from,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    LoadRoot {
        path: PathBuf,
    },
    RefreshTree {
        override_path: Option<PathBuf>,
    },
    TreeLoaded {
        request: u64,
        path: PathBuf,
        nodes: Vec<FileNode>,
    },
    TreeLoadFailed {
        request: u64,
        path: PathBuf,
        error: String,
    },
    CreateEntry {
        parent: PathBuf,
        name: String,
        kind: EntryKind,
    },
    DeleteEntry {
        path: PathBuf,
    },
    RenameOrMove {
        from: PathBuf,
        to: PathBuf,
    },
    FsOpFinished {
        op: FsOp,
        result: Result<(), String>,
    },
    ClearError,

    Select {
        path: PathBuf,
    },
    ClearSelection,
    ReloadSelected,
    ContentLoaded {
        path: PathBuf,
        reason: LoadReason,
        content: String,
    },
    ContentLoadFailed {
        path: PathBuf,
        reason: LoadReason,
        error: String,
    },

    SetPreviewMode {
        mode: PreviewMode,
    },
    SetEditBuffer {
        content: String,
    },
    Save,
    Discard,
    FileSaved {
        path: PathBuf,
        content: String,
    },
    FileSaveFailed {
        path: PathBuf,
        error: String,
    },

    GuardedNavigate {
        target: String,
    },
    ConfirmDiscard,
    ConfirmSaveAndSwitch,
    CancelNavigation,

    WatcherEvent {
        paths: Vec<PathBuf>,
        kind: ChangeKind,
        now: Instant,
    },
    ClearChangedFiles,
    Tick {
        now: Instant,
    },

    DropResolved {
        resolution: DropResolution,
    },
}
