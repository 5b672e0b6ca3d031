use std::path::PathBuf;

use crate::kernel::action::LoadReason;
use crate::kernel::state::{NavigationTarget, OpenFileState, PendingNavigation};
use crate::kernel::{Action, Effect};
use crate::models::find_node;

impl super::Store {
    pub(super) fn reduce_selection_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::Select { path } => {
                if self.state.selected_path() == Some(path.as_path()) {
                    // Selecting the open file again toggles it closed.
                    return self.navigate_or_hold(NavigationTarget::Clear);
                }
                let is_dir = find_node(&self.state.session.tree, &path).is_some_and(|n| n.is_dir);
                if is_dir {
                    return super::DispatchResult::unchanged();
                }
                self.navigate_or_hold(NavigationTarget::Open(path))
            }
            Action::ClearSelection => {
                if self.state.open_file.is_none() {
                    return super::DispatchResult::unchanged();
                }
                self.navigate_or_hold(NavigationTarget::Clear)
            }
            Action::ReloadSelected => {
                let Some(file) = self.state.open_file.as_ref() else {
                    return super::DispatchResult::unchanged();
                };
                if file.edit_buffer.is_some() {
                    return super::DispatchResult::unchanged();
                }
                super::DispatchResult {
                    effects: vec![Effect::LoadContent {
                        path: file.selected_path.clone(),
                        kind: file.content_kind,
                        reason: LoadReason::Reload,
                    }],
                    state_changed: false,
                }
            }
            Action::ContentLoaded {
                path,
                reason,
                content,
            } => {
                let Some(file) = self
                    .state
                    .open_file
                    .as_mut()
                    .filter(|f| f.selected_path == path)
                else {
                    tracing::debug!(path = %path.display(), "dropping content for deselected file");
                    return super::DispatchResult::unchanged();
                };
                if file.edit_buffer.is_some() {
                    tracing::debug!(path = %path.display(), ?reason, "keeping edit buffer over disk content");
                    return super::DispatchResult::unchanged();
                }
                file.displayed_content = Some(content);
                file.is_loading = false;
                file.load_error = None;
                super::DispatchResult::changed(true)
            }
            Action::ContentLoadFailed {
                path,
                reason,
                error,
            } => {
                let Some(file) = self
                    .state
                    .open_file
                    .as_mut()
                    .filter(|f| f.selected_path == path)
                else {
                    return super::DispatchResult::unchanged();
                };
                match reason {
                    LoadReason::Open => {
                        tracing::warn!(path = %path.display(), error = %error, "could not load file");
                        file.is_loading = false;
                        file.displayed_content = None;
                        file.load_error = Some(error);
                        super::DispatchResult::changed(true)
                    }
                    LoadReason::Reload => {
                        // The last good content stays on screen.
                        tracing::debug!(path = %path.display(), error = %error, "reload failed");
                        super::DispatchResult::unchanged()
                    }
                }
            }
            _ => unreachable!("non-selection action routed to reduce_selection_action"),
        }
    }

    /// Follows `target` now, or parks it until the user resolves unsaved edits.
    pub(super) fn navigate_or_hold(&mut self, target: NavigationTarget) -> super::DispatchResult {
        if !self.state.is_dirty() {
            return self.follow_navigation(target);
        }
        if self
            .state
            .pending_navigation
            .as_ref()
            .is_some_and(|p| p.switch_after_save)
        {
            // A save-and-switch is already under way.
            return super::DispatchResult::unchanged();
        }
        self.state.pending_navigation = Some(PendingNavigation {
            target,
            switch_after_save: false,
        });
        super::DispatchResult::changed(true)
    }

    /// Unconditionally carries out a navigation, clearing any pending one.
    pub(super) fn follow_navigation(&mut self, target: NavigationTarget) -> super::DispatchResult {
        let had_pending = self.state.pending_navigation.take().is_some();
        match target {
            NavigationTarget::Open(path) => self.open_path(path),
            NavigationTarget::Clear => {
                self.state.open_file = None;
                super::DispatchResult::changed(true)
            }
            NavigationTarget::External(target) => super::DispatchResult {
                effects: vec![Effect::NavigationReleased { target }],
                state_changed: had_pending,
            },
        }
    }

    fn open_path(&mut self, path: PathBuf) -> super::DispatchResult {
        let file = OpenFileState::opening(path.clone());
        let kind = file.content_kind;
        self.state.open_file = Some(file);
        super::DispatchResult {
            effects: vec![Effect::LoadContent {
                path,
                kind,
                reason: LoadReason::Open,
            }],
            state_changed: true,
        }
    }
}
