use crate::kernel::action::{FsOp, LoadReason};
use crate::kernel::Action;
use crate::models::FileNode;
use std::path::PathBuf;

/// Completion of a background storage call. Errors are already stringified
/// because the store only ever displays them.
#[derive(Debug)]
pub enum AppMessage {
    TreeLoaded {
        request: u64,
        path: PathBuf,
        result: Result<Vec<FileNode>, String>,
    },
    ContentLoaded {
        path: PathBuf,
        reason: LoadReason,
        result: Result<String, String>,
    },
    FileSaved {
        path: PathBuf,
        content: String,
        result: Result<(), String>,
    },
    FsOpFinished {
        op: FsOp,
        result: Result<(), String>,
    },
}

impl From<AppMessage> for Action {
    fn from(message: AppMessage) -> Self {
        match message {
            AppMessage::TreeLoaded {
                request,
                path,
                result,
            } => match result {
                Ok(nodes) => Action::TreeLoaded {
                    request,
                    path,
                    nodes,
                },
                Err(error) => Action::TreeLoadFailed {
                    request,
                    path,
                    error,
                },
            },
            AppMessage::ContentLoaded {
                path,
                reason,
                result,
            } => match result {
                Ok(content) => Action::ContentLoaded {
                    path,
                    reason,
                    content,
                },
                Err(error) => Action::ContentLoadFailed {
                    path,
                    reason,
                    error,
                },
            },
            AppMessage::FileSaved {
                path,
                content,
                result,
            } => match result {
                Ok(()) => Action::FileSaved { path, content },
                Err(error) => Action::FileSaveFailed { path, error },
            },
            AppMessage::FsOpFinished { op, result } => Action::FsOpFinished { op, result },
        }
    }
}
