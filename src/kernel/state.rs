use super::changes::{ChangeRecord, RefreshDebounce};
use crate::kernel::services::ports::WorkspaceSettings;
use crate::models::FileNode;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewMode {
    #[default]
    Preview,
    Source,
    Edit,
}

/// How a file is read for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Text,
    /// Images, media and pdf: loaded as a `data:` URL.
    Renderable,
}

const RENDERABLE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "ico", "pdf", "mp4", "webm", "mov", "avi", "mp3",
    "wav", "ogg", "aac", "m4a",
];

impl ContentKind {
    pub fn for_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if RENDERABLE_EXTENSIONS.contains(&ext.as_str()) {
            ContentKind::Renderable
        } else {
            ContentKind::Text
        }
    }
}

/// Root-scoped tree state. Replaced wholesale on root change.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceSession {
    pub root: Option<PathBuf>,
    pub tree: Vec<FileNode>,
    pub is_loading: bool,
    /// "Could not load" for the tree as a whole; only set by a failed root load.
    pub load_error: Option<String>,
    pub(crate) next_request: u64,
    pub(crate) applied_request: u64,
    /// Request issued by the last root load, until something newer lands.
    pub(crate) root_request: Option<u64>,
}

impl WorkspaceSession {
    pub fn contains_path(&self, path: &Path) -> bool {
        self.root.as_deref().is_some_and(|root| path.starts_with(root))
    }

    pub(crate) fn issue_request(&mut self) -> u64 {
        self.next_request = self.next_request.saturating_add(1);
        self.next_request
    }
}

/// The single file shown in the preview/edit pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenFileState {
    pub selected_path: PathBuf,
    pub content_kind: ContentKind,
    /// Last content successfully loaded from (or saved to) disk.
    pub displayed_content: Option<String>,
    /// `Some` only while editing; `None` means not dirty.
    pub edit_buffer: Option<String>,
    pub preview_mode: PreviewMode,
    pub is_loading: bool,
    pub is_saving: bool,
    pub load_error: Option<String>,
    pub save_error: Option<String>,
}

impl OpenFileState {
    pub fn opening(path: PathBuf) -> Self {
        Self {
            content_kind: ContentKind::for_path(&path),
            selected_path: path,
            displayed_content: None,
            edit_buffer: None,
            preview_mode: PreviewMode::Preview,
            is_loading: true,
            is_saving: false,
            load_error: None,
            save_error: None,
        }
    }

    pub fn is_dirty(&self) -> bool {
        match &self.edit_buffer {
            Some(buffer) => self.displayed_content.as_deref() != Some(buffer.as_str()),
            None => false,
        }
    }
}

/// Where a guarded navigation goes once the user has decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    Open(PathBuf),
    /// Deselect the current file.
    Clear,
    /// Opaque navigation owned by another feature; released via an effect.
    External(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNavigation {
    pub target: NavigationTarget,
    pub switch_after_save: bool,
}

/// Generic failure indicator for the last tree operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationError {
    pub op: &'static str,
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct WorkspaceState {
    pub settings: WorkspaceSettings,
    pub session: WorkspaceSession,
    pub changes: ChangeRecord,
    pub refresh: RefreshDebounce,
    pub open_file: Option<OpenFileState>,
    pub pending_navigation: Option<PendingNavigation>,
    pub last_error: Option<OperationError>,
}

impl WorkspaceState {
    pub fn new(settings: WorkspaceSettings) -> Self {
        Self {
            refresh: RefreshDebounce::new(settings.refresh_debounce()),
            settings,
            session: WorkspaceSession::default(),
            changes: ChangeRecord::default(),
            open_file: None,
            pending_navigation: None,
            last_error: None,
        }
    }

    pub fn selected_path(&self) -> Option<&Path> {
        self.open_file.as_ref().map(|f| f.selected_path.as_path())
    }

    pub fn is_dirty(&self) -> bool {
        self.open_file.as_ref().is_some_and(OpenFileState::is_dirty)
    }

    /// Gate for any feature about to navigate away: unsaved edits exist.
    pub fn requires_confirmation(&self) -> bool {
        self.is_dirty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
