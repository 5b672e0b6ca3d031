//! Pointer-driven drag of a tree entry.
//!
//! The host webview swallows native drag events, so a drag is tracked from
//! raw pointer positions and resolved by hit-testing registered folder rows.
//! One controller per window, passed explicitly to whoever needs it.

use crate::models::{Pos, Rect};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub source_path: PathBuf,
    pub is_dir: bool,
    pub last_pos: Option<Pos>,
    pub started_at: Instant,
}

/// Outcome of a pointer release, consumed once by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropResolution {
    pub source_path: PathBuf,
    pub target_folder: Option<PathBuf>,
    pub dropped_inside_tree: bool,
}

#[derive(Debug)]
pub struct DragController {
    session: Option<DragSession>,
    targets: Vec<(PathBuf, Rect)>,
    tree_bounds: Option<Rect>,
    active_until: Option<Instant>,
    grace: Duration,
    timeout: Duration,
}

impl DragController {
    pub fn new(grace: Duration, timeout: Duration) -> Self {
        Self {
            session: None,
            targets: Vec::new(),
            tree_bounds: None,
            active_until: None,
            grace,
            timeout,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn set_tree_bounds(&mut self, bounds: Rect) {
        self.tree_bounds = Some(bounds);
    }

    /// Registers (or moves) the on-screen row of a folder that accepts drops.
    pub fn register_drop_target(&mut self, dir: PathBuf, rect: Rect) {
        if let Some(entry) = self.targets.iter_mut().find(|(path, _)| *path == dir) {
            entry.1 = rect;
        } else {
            self.targets.push((dir, rect));
        }
    }

    /// Called before each layout pass re-registers the visible rows.
    pub fn clear_drop_targets(&mut self) {
        self.targets.clear();
    }

    pub fn start_drag(&mut self, path: PathBuf, is_dir: bool, now: Instant) {
        if let Some(previous) = self.session.take() {
            tracing::debug!(source = %previous.source_path.display(), "replacing unfinished drag");
        }
        self.session = Some(DragSession {
            source_path: path,
            is_dir,
            last_pos: None,
            started_at: now,
        });
        self.active_until = None;
    }

    pub fn move_drag(&mut self, pos: Pos) {
        if let Some(session) = self.session.as_mut() {
            session.last_pos = Some(pos);
        }
    }

    /// Folder currently under the pointer, for highlight only.
    pub fn hovered_target(&self) -> Option<&Path> {
        let session = self.session.as_ref()?;
        let pos = session.last_pos?;
        self.target_at(pos, &session.source_path)
    }

    pub fn end_drag(&mut self, now: Instant) -> Option<DropResolution> {
        let Some(session) = self.session.take() else {
            self.active_until = None;
            return None;
        };
        self.active_until = Some(now + self.grace);

        let resolution = match session.last_pos {
            // Released without moving: still over its own row.
            None => DropResolution {
                source_path: session.source_path,
                target_folder: None,
                dropped_inside_tree: true,
            },
            Some(pos) => DropResolution {
                target_folder: self
                    .target_at(pos, &session.source_path)
                    .map(Path::to_path_buf),
                dropped_inside_tree: self.tree_bounds.is_some_and(|bounds| bounds.contains(pos)),
                source_path: session.source_path,
            },
        };

        tracing::debug!(
            source = %resolution.source_path.display(),
            target = ?resolution.target_folder,
            inside_tree = resolution.dropped_inside_tree,
            "drag released"
        );
        Some(resolution)
    }

    /// True while dragging and for a short grace window after release, so an
    /// OS-level drop firing at the same moment can tell an internal drag apart.
    pub fn is_drag_active(&mut self, now: Instant) -> bool {
        self.expire(now);
        if self.session.is_some() {
            return true;
        }
        match self.active_until {
            Some(until) if now < until => true,
            Some(_) => {
                self.active_until = None;
                false
            }
            None => false,
        }
    }

    /// Abandons a session whose pointer release never arrived.
    pub fn expire(&mut self, now: Instant) -> bool {
        let stale = self
            .session
            .as_ref()
            .is_some_and(|s| now.saturating_duration_since(s.started_at) >= self.timeout);
        if stale {
            if let Some(session) = self.session.take() {
                tracing::debug!(source = %session.source_path.display(), "drag timed out");
            }
            self.active_until = None;
        }
        stale
    }

    fn target_at(&self, pos: Pos, source: &Path) -> Option<&Path> {
        let (path, _) = self
            .targets
            .iter()
            .filter(|(_, rect)| rect.contains(pos))
            .min_by(|(_, a), (_, b)| a.area().total_cmp(&b.area()))?;
        (path.as_path() != source).then_some(path.as_path())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/drag.rs"]
mod tests;
