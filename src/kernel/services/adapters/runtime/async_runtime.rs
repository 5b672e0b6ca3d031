use super::message::AppMessage;
use crate::kernel::action::{FsOp, LoadReason};
use crate::kernel::services::ports::{EntryKind, StorageResult, WorkspaceStorage};
use crate::kernel::state::ContentKind;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::Arc;

pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<AppMessage>,
    storage: Arc<dyn WorkspaceStorage>,
}

impl AsyncRuntime {
    pub fn new(tx: Sender<AppMessage>, storage: Arc<dyn WorkspaceStorage>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self {
            runtime,
            tx,
            storage,
        })
    }

    pub fn load_tree(&self, request: u64, path: PathBuf, max_depth: u32) {
        let root = path.clone();
        self.spawn_storage(
            move |storage| storage.read_directory_tree(&root, max_depth),
            move |result| AppMessage::TreeLoaded {
                request,
                path,
                result,
            },
        );
    }

    pub fn load_content(&self, path: PathBuf, kind: ContentKind, reason: LoadReason) {
        let target = path.clone();
        self.spawn_storage(
            move |storage| match kind {
                ContentKind::Text => storage.read_file_text(&target),
                ContentKind::Renderable => storage.read_file_renderable(&target),
            },
            move |result| AppMessage::ContentLoaded {
                path,
                reason,
                result,
            },
        );
    }

    pub fn write_file(&self, path: PathBuf, content: String) {
        let target = path.clone();
        let written = content.clone();
        self.spawn_storage(
            move |storage| storage.write_file_text(&target, &written),
            move |result| AppMessage::FileSaved {
                path,
                content,
                result,
            },
        );
    }

    pub fn create_entry(&self, path: PathBuf, kind: EntryKind) {
        let target = path.clone();
        self.spawn_storage(
            move |storage| match kind {
                EntryKind::File => storage.create_file(&target),
                EntryKind::Directory => storage.create_directory(&target),
            },
            move |result| AppMessage::FsOpFinished {
                op: FsOp::Create { path, kind },
                result,
            },
        );
    }

    pub fn delete_entry(&self, path: PathBuf) {
        let target = path.clone();
        self.spawn_storage(
            move |storage| storage.delete_entry(&target),
            move |result| AppMessage::FsOpFinished {
                op: FsOp::Delete { path },
                result,
            },
        );
    }

    pub fn rename_or_move(&self, from: PathBuf, to: PathBuf) {
        let (src, dst) = (from.clone(), to.clone());
        self.spawn_storage(
            move |storage| storage.rename_or_move(&src, &dst),
            move |result| AppMessage::FsOpFinished {
                op: FsOp::Rename { from, to },
                result,
            },
        );
    }

    /// Runs blocking storage work off the async workers and reports back once.
    fn spawn_storage<T, W, M>(&self, work: W, into_message: M)
    where
        T: Send + 'static,
        W: FnOnce(&dyn WorkspaceStorage) -> StorageResult<T> + Send + 'static,
        M: FnOnce(Result<T, String>) -> AppMessage + Send + 'static,
    {
        let tx = self.tx.clone();
        let storage = Arc::clone(&self.storage);
        self.runtime.spawn(async move {
            let result = match tokio::task::spawn_blocking(move || work(storage.as_ref())).await {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(e)) => Err(e.to_string()),
                Err(e) => {
                    tracing::error!(error = %e, "storage task panicked");
                    Err(e.to_string())
                }
            };
            let _ = tx.send(into_message(result));
        });
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/async_runtime.rs"]
mod tests;
