//! Wires the headless store to its collaborators: runs effects, feeds
//! completions and watcher notifications back in as actions.

use crate::kernel::services::adapters::{AppMessage, AsyncRuntime, LocalStorage, WorkspaceWatcher};
use crate::kernel::services::ports::{WorkspaceSettings, WorkspaceStorage};
use crate::kernel::{Action, DragController, Effect, Store, WorkspaceState};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

/// Requests the host cannot serve itself; the embedding shell drains them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A tree entry was dropped outside the tree.
    AttachPath(PathBuf),
    /// A guarded navigation was confirmed (or never needed confirming).
    NavigationReleased(String),
    /// Live updates are unavailable for this root.
    WatchFailed { path: PathBuf, error: String },
}

pub struct WorkspaceHost {
    store: Store,
    runtime: AsyncRuntime,
    rx: mpsc::Receiver<AppMessage>,
    watcher: Option<WorkspaceWatcher>,
    drag: DragController,
    outbox: Vec<HostEvent>,
}

impl WorkspaceHost {
    pub fn new(
        settings: WorkspaceSettings,
        storage: Arc<dyn WorkspaceStorage>,
    ) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let runtime = AsyncRuntime::new(tx, storage)?;
        let watcher = match WorkspaceWatcher::new(settings.ignored_names.clone()) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                tracing::warn!(error = %e, "file watcher unavailable; tree will not live-update");
                None
            }
        };
        let drag = DragController::new(settings.drag_grace(), settings.drag_timeout());
        Ok(Self {
            store: Store::new(WorkspaceState::new(settings)),
            runtime,
            rx,
            watcher,
            drag,
            outbox: Vec::new(),
        })
    }

    pub fn with_local_storage(settings: WorkspaceSettings) -> io::Result<Self> {
        let storage = Arc::new(LocalStorage::new(&settings));
        Self::new(settings, storage)
    }

    pub fn state(&self) -> &WorkspaceState {
        self.store.state()
    }

    pub fn drag(&mut self) -> &mut DragController {
        &mut self.drag
    }

    /// Folder the pointer is over during a drag, for highlighting.
    pub fn drop_target(&self) -> Option<&Path> {
        self.drag.hovered_target()
    }

    pub fn open_root(&mut self, path: PathBuf) -> bool {
        self.dispatch(Action::LoadRoot { path })
    }

    /// Reduces `action`, runs the resulting effects, reports whether state changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            self.run_effect(effect);
        }
        result.state_changed
    }

    pub fn handle_message(&mut self, msg: AppMessage) -> bool {
        self.dispatch(msg.into())
    }

    /// Called from the main loop: drains completions and watcher notifications,
    /// then lets timers fire.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        while let Ok(msg) = self.rx.try_recv() {
            changed |= self.handle_message(msg);
        }
        changed |= self.poll_watcher(now);
        changed |= self.dispatch(Action::Tick { now });
        changed |= self.drag.expire(now);
        changed
    }

    /// Pointer released: resolves the drop against registered folder rows.
    pub fn end_drag(&mut self, now: Instant) -> bool {
        match self.drag.end_drag(now) {
            Some(resolution) => self.dispatch(Action::DropResolved { resolution }),
            None => false,
        }
    }

    pub fn take_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.outbox)
    }

    fn poll_watcher(&mut self, now: Instant) -> bool {
        let Some(watcher) = self.watcher.as_mut() else {
            return false;
        };
        let events = watcher.drain_events();
        let mut changed = false;
        for event in events {
            changed |= self.dispatch(Action::WatcherEvent {
                paths: event.paths,
                kind: event.kind,
                now,
            });
        }
        changed
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::LoadTree {
                request,
                path,
                max_depth,
            } => self.runtime.load_tree(request, path, max_depth),
            Effect::LoadContent { path, kind, reason } => {
                self.runtime.load_content(path, kind, reason)
            }
            Effect::WriteFile { path, content } => self.runtime.write_file(path, content),
            Effect::CreateEntry { path, kind } => self.runtime.create_entry(path, kind),
            Effect::DeleteEntry { path } => self.runtime.delete_entry(path),
            Effect::RenameOrMove { from, to } => self.runtime.rename_or_move(from, to),
            Effect::Watch { path } => {
                let Some(watcher) = self.watcher.as_mut() else {
                    return;
                };
                if let Err(e) = watcher.watch(&path) {
                    tracing::warn!(path = %path.display(), error = %e, "watch failed");
                    self.outbox.push(HostEvent::WatchFailed {
                        path,
                        error: e.to_string(),
                    });
                }
            }
            Effect::Unwatch { path } => {
                if let Some(watcher) = self.watcher.as_mut() {
                    watcher.unwatch(&path);
                }
            }
            Effect::AttachPath { path } => self.outbox.push(HostEvent::AttachPath(path)),
            Effect::NavigationReleased { target } => {
                self.outbox.push(HostEvent::NavigationReleased(target))
            }
        }
    }
}
