//! Headless workspace core (state/action/effect).

pub mod action;
pub mod changes;
pub mod drag;
pub mod effect;
pub mod services;
pub mod state;
pub mod store;

pub use action::{Action, FsOp, LoadReason};
pub use changes::{ChangeKind, ChangeRecord, RefreshDebounce};
pub use drag::{DragController, DragSession, DropResolution};
pub use effect::Effect;
pub use state::{
    ContentKind, NavigationTarget, OpenFileState, OperationError, PendingNavigation, PreviewMode,
    WorkspaceSession, WorkspaceState,
};
pub use store::{DispatchResult, Store};
