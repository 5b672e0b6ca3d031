use crate::kernel::state::{NavigationTarget, PreviewMode};
use crate::kernel::Action;

impl super::Store {
    pub(super) fn reduce_navigation_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::GuardedNavigate { target } => {
                self.navigate_or_hold(NavigationTarget::External(target))
            }
            Action::ConfirmDiscard => {
                let Some(pending) = self.state.pending_navigation.take() else {
                    return super::DispatchResult::unchanged();
                };
                if let Some(file) = self.state.open_file.as_mut() {
                    file.edit_buffer = None;
                    file.preview_mode = PreviewMode::Preview;
                    file.save_error = None;
                }
                let mut result = super::DispatchResult::changed(true);
                result.merge(self.follow_navigation(pending.target));
                result
            }
            Action::ConfirmSaveAndSwitch => {
                let Some(pending) = self.state.pending_navigation.as_ref() else {
                    return super::DispatchResult::unchanged();
                };
                if pending.switch_after_save {
                    return super::DispatchResult::unchanged();
                }
                if !self.state.is_dirty() {
                    // Edits were undone by hand while the prompt was up.
                    let target = pending.target.clone();
                    if let Some(file) = self.state.open_file.as_mut() {
                        file.edit_buffer = None;
                        file.preview_mode = PreviewMode::Preview;
                    }
                    return self.follow_navigation(target);
                }
                if let Some(pending) = self.state.pending_navigation.as_mut() {
                    pending.switch_after_save = true;
                }
                let mut result = super::DispatchResult::changed(true);
                result.merge(self.reduce_edit_action(Action::Save));
                result
            }
            Action::CancelNavigation => {
                super::DispatchResult::changed(self.state.pending_navigation.take().is_some())
            }
            _ => unreachable!("non-navigation action routed to reduce_navigation_action"),
        }
    }
}
