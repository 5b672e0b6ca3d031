use crate::kernel::changes::ChangeKind;
use crate::kernel::Action;

impl super::Store {
    pub(super) fn reduce_change_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::WatcherEvent { paths, kind, now } => {
                let paths: Vec<_> = paths
                    .into_iter()
                    .filter(|path| self.state.session.contains_path(path))
                    .collect();
                if paths.is_empty() {
                    return super::DispatchResult::unchanged();
                }

                let touches_selected = self
                    .state
                    .selected_path()
                    .is_some_and(|selected| paths.iter().any(|p| p == selected));

                let mut state_changed = false;
                for path in paths {
                    state_changed |= self.state.changes.mark(path, kind);
                }
                if kind.is_structural() {
                    self.state.refresh.bump(now);
                }

                let mut result = super::DispatchResult::changed(state_changed);
                if kind == ChangeKind::Modified && touches_selected {
                    result.merge(self.reduce_selection_action(Action::ReloadSelected));
                }
                result
            }
            Action::ClearChangedFiles => super::DispatchResult::changed(self.state.changes.clear()),
            Action::Tick { now } => {
                if !self.state.refresh.fire(now) {
                    return super::DispatchResult::unchanged();
                }
                tracing::debug!("debounced tree refresh");
                super::DispatchResult {
                    effects: self.tree_refresh_effect().into_iter().collect(),
                    state_changed: false,
                }
            }
            _ => unreachable!("non-change action routed to reduce_change_action"),
        }
    }
}
