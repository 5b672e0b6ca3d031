use crate::kernel::changes::ChangeKind;
use crate::kernel::services::ports::{StorageError, StorageResult};
use crate::models::{rebase_path, should_ignore};
use notify::event::{ModifyKind, RenameMode};
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Component, Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

const WATCHER_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// One normalized filesystem notification: every path shares the same kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChangeEvent {
    pub paths: Vec<PathBuf>,
    pub kind: ChangeKind,
}

struct WatchedRoot {
    /// As requested by the caller; reported paths are expressed under it.
    root: PathBuf,
    /// What the OS reports events under (symlinks and `/private` on macOS).
    canonical: PathBuf,
}

/// Recursive watch on at most one workspace root at a time.
pub struct WorkspaceWatcher {
    watcher: RecommendedWatcher,
    raw_event_rx: mpsc::Receiver<notify::Event>,
    watched: Option<WatchedRoot>,
    ignored_names: Vec<String>,
}

impl WorkspaceWatcher {
    pub fn new(ignored_names: Vec<String>) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let watcher = RecommendedWatcher::new(
            move |res: Result<notify::Event, notify::Error>| match res {
                Ok(event) => {
                    let _ = tx.send(event);
                }
                Err(e) => tracing::warn!(error = %e, "file watcher error"),
            },
            Config::default().with_poll_interval(WATCHER_POLL_INTERVAL),
        )?;
        Ok(Self {
            watcher,
            raw_event_rx: rx,
            watched: None,
            ignored_names,
        })
    }

    pub fn watched_root(&self) -> Option<&Path> {
        self.watched.as_ref().map(|w| w.root.as_path())
    }

    /// Starts watching `root`, dropping any previous watch first.
    pub fn watch(&mut self, root: &Path) -> StorageResult<()> {
        if self.watched_root() == Some(root) {
            return Ok(());
        }
        if let Some(previous) = self.watched.take() {
            self.release(&previous);
        }
        let canonical = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        self.watcher
            .watch(&canonical, RecursiveMode::Recursive)
            .map_err(|e| StorageError::WatchFailed {
                path: root.to_path_buf(),
                message: e.to_string(),
            })?;
        tracing::info!(root = %root.display(), "watching workspace");
        self.watched = Some(WatchedRoot {
            root: root.to_path_buf(),
            canonical,
        });
        Ok(())
    }

    /// Stops watching `root`; events still queued for it are discarded.
    pub fn unwatch(&mut self, root: &Path) -> bool {
        if self.watched_root() != Some(root) {
            return false;
        }
        if let Some(previous) = self.watched.take() {
            self.release(&previous);
        }
        while self.raw_event_rx.try_recv().is_ok() {}
        true
    }

    pub fn drain_events(&mut self) -> Vec<FileChangeEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.raw_event_rx.try_recv() {
            let Some(watched) = self.watched.as_ref() else {
                continue;
            };
            for change in normalize_notify_event(event) {
                let paths: Vec<PathBuf> = change
                    .paths
                    .iter()
                    .filter_map(|path| to_workspace_path(path, watched, &self.ignored_names))
                    .collect();
                if !paths.is_empty() {
                    events.push(FileChangeEvent {
                        paths,
                        kind: change.kind,
                    });
                }
            }
        }
        events
    }

    fn release(&mut self, watched: &WatchedRoot) {
        match self.watcher.unwatch(&watched.canonical) {
            Ok(()) => tracing::info!(root = %watched.root.display(), "stopped watching workspace"),
            Err(e) => tracing::debug!(root = %watched.root.display(), error = %e, "unwatch failed"),
        }
    }
}

fn to_workspace_path(path: &Path, watched: &WatchedRoot, ignored: &[String]) -> Option<PathBuf> {
    let resolved = if path.starts_with(&watched.root) {
        path.to_path_buf()
    } else {
        rebase_path(path, &watched.canonical, &watched.root)?
    };
    if contains_ignored_component(&resolved, &watched.root, ignored) {
        return None;
    }
    Some(resolved)
}

fn contains_ignored_component(path: &Path, root: &Path, ignored: &[String]) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.components().any(|component| {
        if let Component::Normal(name) = component {
            should_ignore(&name.to_string_lossy(), ignored)
        } else {
            false
        }
    })
}

/// Maps a raw notify event onto change markers. Renames become a removal of
/// the old path and a creation of the new one.
pub(crate) fn normalize_notify_event(event: notify::Event) -> Vec<FileChangeEvent> {
    let single = |kind: ChangeKind, paths: Vec<PathBuf>| {
        if paths.is_empty() {
            Vec::new()
        } else {
            vec![FileChangeEvent { paths, kind }]
        }
    };
    match event.kind {
        EventKind::Create(_) => single(ChangeKind::Created, event.paths),
        EventKind::Remove(_) => single(ChangeKind::Removed, event.paths),
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
            single(ChangeKind::Removed, event.paths)
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => {
            single(ChangeKind::Created, event.paths)
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) if event.paths.len() >= 2 => {
            let mut paths = event.paths.into_iter();
            let (Some(from), Some(to)) = (paths.next(), paths.next()) else {
                return Vec::new();
            };
            vec![
                FileChangeEvent {
                    paths: vec![from],
                    kind: ChangeKind::Removed,
                },
                FileChangeEvent {
                    paths: vec![to],
                    kind: ChangeKind::Created,
                },
            ]
        }
        EventKind::Modify(ModifyKind::Name(_)) => {
            // Direction unknown: classify by whether the path still exists.
            let (present, gone): (Vec<_>, Vec<_>) =
                event.paths.into_iter().partition(|path| path.exists());
            let mut out = single(ChangeKind::Removed, gone);
            out.extend(single(ChangeKind::Created, present));
            out
        }
        EventKind::Modify(ModifyKind::Metadata(_)) => Vec::new(),
        EventKind::Modify(_) => single(ChangeKind::Modified, event.paths),
        _ => Vec::new(),
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/file_watcher.rs"]
mod tests;
