//! Per-path change markers and the structural refresh debounce.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Modified,
    Removed,
}

impl ChangeKind {
    /// Created/removed alter the tree shape; modified does not.
    pub fn is_structural(self) -> bool {
        matches!(self, ChangeKind::Created | ChangeKind::Removed)
    }

    pub fn badge(self) -> char {
        match self {
            ChangeKind::Created => 'A',
            ChangeKind::Modified => 'M',
            ChangeKind::Removed => 'D',
        }
    }
}

/// "Changed since I started looking" markers, keyed by absolute path.
///
/// Last event wins by arrival order. Survives tree refreshes; only an explicit
/// clear or a root change empties it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeRecord {
    entries: FxHashMap<PathBuf, ChangeKind>,
}

impl ChangeRecord {
    /// Returns true when the stored marker actually changed.
    pub fn mark(&mut self, path: PathBuf, kind: ChangeKind) -> bool {
        self.entries.insert(path, kind) != Some(kind)
    }

    pub fn kind(&self, path: &Path) -> Option<ChangeKind> {
        self.entries.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) -> bool {
        let had_entries = !self.entries.is_empty();
        self.entries.clear();
        had_entries
    }

    /// Some marker sits strictly below `dir`.
    pub fn has_changed_descendant(&self, dir: &Path) -> bool {
        self.iter()
            .any(|(path, _)| path != dir && path.starts_with(dir))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, ChangeKind)> {
        self.entries.iter().map(|(path, kind)| (path.as_path(), *kind))
    }

    /// Markers sorted by path, for stable display and logging.
    pub fn sorted(&self) -> Vec<(PathBuf, ChangeKind)> {
        let mut out: Vec<_> = self
            .iter()
            .map(|(path, kind)| (path.to_path_buf(), kind))
            .collect();
        out.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        out
    }
}

/// Single reset-in-place timer for the debounced tree refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshDebounce {
    window: Duration,
    deadline: Option<Instant>,
}

impl RefreshDebounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Arms the timer, or pushes an armed timer out to `now + window`.
    pub fn bump(&mut self, now: Instant) {
        let next = now + self.window;
        self.deadline = Some(match self.deadline {
            Some(existing) if existing > next => existing,
            _ => next,
        });
    }

    /// True exactly once per armed timer, when `now` has reached the deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/changes.rs"]
mod tests;
