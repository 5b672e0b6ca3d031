use std::path::{Path, PathBuf};

use crate::kernel::action::{FsOp, LoadReason};
use crate::kernel::drag::DropResolution;
use crate::kernel::state::{ContentKind, NavigationTarget, OperationError, WorkspaceSession};
use crate::kernel::{Action, Effect};
use crate::models::{is_same_or_descendant, is_valid_entry_name, rebase_path};

impl super::Store {
    pub(super) fn reduce_tree_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::LoadRoot { path } => self.load_root(path),
            Action::RefreshTree { override_path } => self.refresh_tree(override_path),
            Action::TreeLoaded {
                request,
                path,
                nodes,
            } => {
                if !self.is_current_tree_result(request, &path) {
                    tracing::debug!(request, path = %path.display(), "dropping stale tree result");
                    return super::DispatchResult::unchanged();
                }
                let session = &mut self.state.session;
                session.applied_request = request;
                session.tree = nodes;
                session.load_error = None;
                if session.root_request.is_some_and(|root| request >= root) {
                    session.root_request = None;
                    session.is_loading = false;
                }
                super::DispatchResult::changed(true)
            }
            Action::TreeLoadFailed {
                request,
                path,
                error,
            } => {
                if !self.is_current_tree_result(request, &path) {
                    return super::DispatchResult::unchanged();
                }
                let session = &mut self.state.session;
                if session.root_request.is_some_and(|root| request >= root) {
                    tracing::warn!(path = %path.display(), error = %error, "workspace load failed");
                    session.applied_request = request;
                    session.root_request = None;
                    session.is_loading = false;
                    session.tree.clear();
                    session.load_error = Some(error);
                    super::DispatchResult::changed(true)
                } else {
                    // A failed refresh keeps whatever tree is on screen.
                    tracing::debug!(path = %path.display(), error = %error, "tree refresh failed");
                    super::DispatchResult::unchanged()
                }
            }
            Action::CreateEntry { parent, name, kind } => {
                if !is_valid_entry_name(&name) {
                    return self.reject("create_entry", parent.join(&name), "invalid name");
                }
                if !self.state.session.contains_path(&parent) {
                    return self.reject("create_entry", parent, "outside workspace");
                }
                super::DispatchResult {
                    effects: vec![Effect::CreateEntry {
                        path: parent.join(name),
                        kind,
                    }],
                    state_changed: self.state.last_error.take().is_some(),
                }
            }
            Action::DeleteEntry { path } => {
                if !self.is_inside_root(&path) {
                    return self.reject("delete_entry", path, "outside workspace");
                }
                super::DispatchResult {
                    effects: vec![Effect::DeleteEntry { path }],
                    state_changed: self.state.last_error.take().is_some(),
                }
            }
            Action::RenameOrMove { from, to } => self.rename_or_move(from, to),
            Action::FsOpFinished { op, result } => self.finish_fs_op(op, result),
            Action::ClearError => super::DispatchResult::changed(self.state.last_error.take().is_some()),
            Action::DropResolved { resolution } => self.resolve_drop(resolution),
            _ => unreachable!("non-tree action routed to reduce_tree_action"),
        }
    }

    fn load_root(&mut self, path: PathBuf) -> super::DispatchResult {
        let mut effects = Vec::new();
        let previous = self.state.session.root.take();
        let root_changed = previous.as_deref() != Some(path.as_path());
        if root_changed {
            if let Some(old) = previous {
                effects.push(Effect::Unwatch { path: old });
            }
            effects.push(Effect::Watch { path: path.clone() });
        }

        let old = std::mem::take(&mut self.state.session);
        self.state.session = WorkspaceSession {
            root: Some(path.clone()),
            is_loading: true,
            next_request: old.next_request,
            applied_request: old.applied_request,
            ..WorkspaceSession::default()
        };
        self.state.changes.clear();
        self.state.refresh.cancel();
        self.state.last_error = None;

        // Unsaved edits outlive a root switch; everything else is session-scoped.
        if root_changed && !self.state.is_dirty() {
            self.state.open_file = None;
            self.state.pending_navigation = None;
        }

        let request = self.state.session.issue_request();
        self.state.session.root_request = Some(request);
        tracing::info!(root = %path.display(), request, "loading workspace");
        effects.push(Effect::LoadTree {
            request,
            path,
            max_depth: self.state.settings.tree_depth,
        });
        super::DispatchResult {
            effects,
            state_changed: true,
        }
    }

    fn refresh_tree(&mut self, override_path: Option<PathBuf>) -> super::DispatchResult {
        let mut effects = Vec::new();
        let mut state_changed = false;
        let mut rebound = false;
        if let Some(path) = override_path {
            let current = self.state.session.root.as_deref();
            if current != Some(path.as_path()) {
                if let Some(old) = self.state.session.root.replace(path.clone()) {
                    effects.push(Effect::Unwatch { path: old });
                }
                effects.push(Effect::Watch { path });
                rebound = true;
                state_changed = true;
            }
        }
        match self.tree_refresh_effect() {
            Some(effect) => {
                // A rebound root is loading until this request (or a newer one) lands.
                if let Effect::LoadTree { request, .. } = &effect {
                    if rebound {
                        self.state.session.root_request = Some(*request);
                        self.state.session.is_loading = true;
                    }
                }
                effects.push(effect);
            }
            None => tracing::debug!("refresh without an open workspace"),
        }
        super::DispatchResult {
            effects,
            state_changed,
        }
    }

    fn is_current_tree_result(&self, request: u64, path: &Path) -> bool {
        let session = &self.state.session;
        session.root.as_deref() == Some(path) && request > session.applied_request
    }

    /// Strictly below the root; the root itself is not editable.
    fn is_inside_root(&self, path: &Path) -> bool {
        self.state.session.contains_path(path) && self.state.session.root.as_deref() != Some(path)
    }

    fn rename_or_move(&mut self, from: PathBuf, to: PathBuf) -> super::DispatchResult {
        if from == to {
            return super::DispatchResult::unchanged();
        }
        if !self.is_inside_root(&from) || !self.is_inside_root(&to) {
            return self.reject("rename_or_move", from, "outside workspace");
        }
        if is_same_or_descendant(&to, &from) {
            return self.reject("rename_or_move", from, "cannot move into itself");
        }
        let name_ok = to
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(is_valid_entry_name);
        if !name_ok {
            return self.reject("rename_or_move", from, "invalid name");
        }
        super::DispatchResult {
            effects: vec![Effect::RenameOrMove { from, to }],
            state_changed: self.state.last_error.take().is_some(),
        }
    }

    fn finish_fs_op(&mut self, op: FsOp, result: Result<(), String>) -> super::DispatchResult {
        let mut state_changed = false;
        let mut effects = Vec::new();
        match result {
            Ok(()) => {
                state_changed |= self.state.last_error.take().is_some();
                match &op {
                    FsOp::Create { .. } => {}
                    FsOp::Delete { path } => state_changed |= self.forget_deleted(path),
                    FsOp::Rename { from, to } => {
                        let retargeted = self.retarget_renamed(from, to);
                        state_changed |= retargeted.state_changed;
                        effects = retargeted.effects;
                    }
                }
            }
            Err(message) => {
                tracing::warn!(op = op.name(), path = %op.path().display(), error = %message, "operation failed");
                self.state.last_error = Some(OperationError {
                    op: op.name(),
                    path: op.path().clone(),
                    message,
                });
                state_changed = true;
            }
        }
        // Reconcile with disk either way; a failure may have left partial state.
        effects.extend(self.tree_refresh_effect());
        super::DispatchResult {
            effects,
            state_changed,
        }
    }

    fn forget_deleted(&mut self, deleted: &Path) -> bool {
        let selected_gone = self
            .state
            .selected_path()
            .is_some_and(|selected| is_same_or_descendant(selected, deleted));
        if !selected_gone || self.state.is_dirty() {
            return false;
        }
        self.state.open_file = None;
        self.state.pending_navigation = None;
        true
    }

    /// Moves the selection (and a pending Open target) along with a rename.
    ///
    /// Completions still in flight report under the old path and get dropped,
    /// so a pending read is reissued and a pending write is abandoned.
    fn retarget_renamed(&mut self, from: &Path, to: &Path) -> super::DispatchResult {
        let mut result = super::DispatchResult::unchanged();
        if let Some(file) = self.state.open_file.as_mut() {
            if let Some(path) = rebase_path(&file.selected_path, from, to) {
                tracing::debug!(to = %path.display(), "selection follows rename");
                let kind = ContentKind::for_path(&path);
                if file.is_saving {
                    tracing::debug!(path = %path.display(), "save interrupted by rename; edits kept");
                    file.is_saving = false;
                    if let Some(pending) = self.state.pending_navigation.as_mut() {
                        pending.switch_after_save = false;
                    }
                }
                let reload =
                    file.edit_buffer.is_none() && (file.is_loading || kind != file.content_kind);
                if kind != file.content_kind && file.edit_buffer.is_none() {
                    file.displayed_content = None;
                }
                file.selected_path = path.clone();
                file.content_kind = kind;
                if reload {
                    file.is_loading = true;
                    file.load_error = None;
                    result.effects.push(Effect::LoadContent {
                        path,
                        kind,
                        reason: LoadReason::Open,
                    });
                }
                result.state_changed = true;
            }
        }
        if let Some(pending) = self.state.pending_navigation.as_mut() {
            if let NavigationTarget::Open(target) = &mut pending.target {
                if let Some(path) = rebase_path(target, from, to) {
                    *target = path;
                    result.state_changed = true;
                }
            }
        }
        result
    }

    fn resolve_drop(&mut self, resolution: DropResolution) -> super::DispatchResult {
        let DropResolution {
            source_path,
            target_folder,
            dropped_inside_tree,
        } = resolution;
        match target_folder {
            Some(folder) => {
                if source_path.parent() == Some(folder.as_path()) {
                    return super::DispatchResult::unchanged();
                }
                let Some(name) = source_path.file_name() else {
                    return super::DispatchResult::unchanged();
                };
                let to = folder.join(name);
                self.rename_or_move(source_path, to)
            }
            None if !dropped_inside_tree => super::DispatchResult {
                effects: vec![Effect::AttachPath { path: source_path }],
                state_changed: false,
            },
            None => super::DispatchResult::unchanged(),
        }
    }

    fn reject(&mut self, op: &'static str, path: PathBuf, message: &str) -> super::DispatchResult {
        tracing::debug!(op, path = %path.display(), reason = message, "rejected tree operation");
        self.state.last_error = Some(OperationError {
            op,
            path,
            message: message.to_string(),
        });
        super::DispatchResult::changed(true)
    }
}
