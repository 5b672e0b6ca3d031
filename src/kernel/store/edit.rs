use crate::kernel::state::{ContentKind, PreviewMode};
use crate::kernel::{Action, Effect};

impl super::Store {
    pub(super) fn reduce_edit_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::SetPreviewMode { mode } => {
                let Some(file) = self.state.open_file.as_mut() else {
                    return super::DispatchResult::unchanged();
                };
                if file.preview_mode == mode {
                    return super::DispatchResult::unchanged();
                }
                if mode == PreviewMode::Edit {
                    let editable = file.content_kind == ContentKind::Text && !file.is_loading;
                    let Some(displayed) = file.displayed_content.as_ref().filter(|_| editable)
                    else {
                        return super::DispatchResult::unchanged();
                    };
                    if file.edit_buffer.is_none() {
                        file.edit_buffer = Some(displayed.clone());
                    }
                }
                file.preview_mode = mode;
                super::DispatchResult::changed(true)
            }
            Action::SetEditBuffer { content } => {
                let Some(file) = self
                    .state
                    .open_file
                    .as_mut()
                    .filter(|f| f.edit_buffer.is_some())
                else {
                    return super::DispatchResult::unchanged();
                };
                if file.edit_buffer.as_deref() == Some(content.as_str()) {
                    return super::DispatchResult::unchanged();
                }
                file.edit_buffer = Some(content);
                super::DispatchResult::changed(true)
            }
            Action::Save => {
                let Some(file) = self.state.open_file.as_mut() else {
                    return super::DispatchResult::unchanged();
                };
                if !file.is_dirty() || file.is_saving {
                    return super::DispatchResult::unchanged();
                }
                let Some(content) = file.edit_buffer.clone() else {
                    return super::DispatchResult::unchanged();
                };
                file.is_saving = true;
                file.save_error = None;
                super::DispatchResult {
                    effects: vec![Effect::WriteFile {
                        path: file.selected_path.clone(),
                        content,
                    }],
                    state_changed: true,
                }
            }
            Action::Discard => {
                let Some(file) = self.state.open_file.as_mut() else {
                    return super::DispatchResult::unchanged();
                };
                let changed = file.edit_buffer.take().is_some()
                    || file.preview_mode != PreviewMode::Preview
                    || file.save_error.is_some();
                file.preview_mode = PreviewMode::Preview;
                file.save_error = None;
                super::DispatchResult::changed(changed)
            }
            Action::FileSaved { path, content } => {
                let Some(file) = self
                    .state
                    .open_file
                    .as_mut()
                    .filter(|f| f.selected_path == path)
                else {
                    tracing::debug!(path = %path.display(), "save finished for a file no longer open");
                    return super::DispatchResult::unchanged();
                };
                tracing::info!(path = %path.display(), bytes = content.len(), "file saved");
                file.is_saving = false;
                file.save_error = None;
                if file.edit_buffer.as_deref() == Some(content.as_str()) {
                    file.edit_buffer = None;
                    file.preview_mode = PreviewMode::Preview;
                }
                file.displayed_content = Some(content);

                let switch = self
                    .state
                    .pending_navigation
                    .as_ref()
                    .filter(|p| p.switch_after_save)
                    .map(|p| p.target.clone());
                match switch {
                    // Typed on while the write was in flight: ask again.
                    Some(_) if self.state.is_dirty() => {
                        if let Some(pending) = self.state.pending_navigation.as_mut() {
                            pending.switch_after_save = false;
                        }
                        super::DispatchResult::changed(true)
                    }
                    Some(target) => {
                        let mut result = super::DispatchResult::changed(true);
                        result.merge(self.follow_navigation(target));
                        result
                    }
                    None => super::DispatchResult::changed(true),
                }
            }
            Action::FileSaveFailed { path, error } => {
                let Some(file) = self
                    .state
                    .open_file
                    .as_mut()
                    .filter(|f| f.selected_path == path)
                else {
                    tracing::warn!(path = %path.display(), error = %error, "save failed for a file no longer open");
                    return super::DispatchResult::unchanged();
                };
                tracing::warn!(path = %path.display(), error = %error, "save failed");
                file.is_saving = false;
                file.save_error = Some(error);
                // Back to waiting on the user; the edits are still there.
                if let Some(pending) = self.state.pending_navigation.as_mut() {
                    pending.switch_after_save = false;
                }
                super::DispatchResult::changed(true)
            }
            _ => unreachable!("non-edit action routed to reduce_edit_action"),
        }
    }
}
