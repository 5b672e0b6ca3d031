use super::{Action, Effect, WorkspaceState};

mod changes;
mod edit;
mod navigation;
mod selection;
mod tree;

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    pub(crate) fn unchanged() -> Self {
        Self {
            effects: Vec::new(),
            state_changed: false,
        }
    }

    pub(crate) fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }

    pub(crate) fn merge(&mut self, other: DispatchResult) {
        self.effects.extend(other.effects);
        self.state_changed |= other.state_changed;
    }
}

/// Owns all workspace state. `dispatch` is the only way it changes.
pub struct Store {
    state: WorkspaceState,
}

impl Store {
    pub fn new(state: WorkspaceState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &WorkspaceState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::LoadRoot { .. }
            | Action::RefreshTree { .. }
            | Action::TreeLoaded { .. }
            | Action::TreeLoadFailed { .. }
            | Action::CreateEntry { .. }
            | Action::DeleteEntry { .. }
            | Action::RenameOrMove { .. }
            | Action::FsOpFinished { .. }
            | Action::ClearError
            | Action::DropResolved { .. } => self.reduce_tree_action(action),

            Action::Select { .. }
            | Action::ClearSelection
            | Action::ReloadSelected
            | Action::ContentLoaded { .. }
            | Action::ContentLoadFailed { .. } => self.reduce_selection_action(action),

            Action::SetPreviewMode { .. }
            | Action::SetEditBuffer { .. }
            | Action::Save
            | Action::Discard
            | Action::FileSaved { .. }
            | Action::FileSaveFailed { .. } => self.reduce_edit_action(action),

            Action::GuardedNavigate { .. }
            | Action::ConfirmDiscard
            | Action::ConfirmSaveAndSwitch
            | Action::CancelNavigation => self.reduce_navigation_action(action),

            Action::WatcherEvent { .. } | Action::ClearChangedFiles | Action::Tick { .. } => {
                self.reduce_change_action(action)
            }
        }
    }

    /// Re-read of the current root; `None` when no root is open.
    fn tree_refresh_effect(&mut self) -> Option<Effect> {
        let path = self.state.session.root.clone()?;
        let request = self.state.session.issue_request();
        Some(Effect::LoadTree {
            request,
            path,
            max_depth: self.state.settings.tree_depth,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
