use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceSettings {
    pub tree_depth: u32,
    pub refresh_debounce_ms: u64,
    pub drag_grace_ms: u64,
    pub drag_timeout_ms: u64,
    pub max_text_bytes: u64,
    pub max_renderable_bytes: u64,
    pub ignored_names: Vec<String>,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            tree_depth: 3,
            refresh_debounce_ms: 300,
            drag_grace_ms: 200,
            drag_timeout_ms: 5_000,
            max_text_bytes: 1_048_576,
            max_renderable_bytes: 50_000_000,
            ignored_names: vec![
                "node_modules".to_string(),
                "target".to_string(),
                "__pycache__".to_string(),
            ],
        }
    }
}

impl WorkspaceSettings {
    pub fn refresh_debounce(&self) -> Duration {
        Duration::from_millis(self.refresh_debounce_ms)
    }

    pub fn drag_grace(&self) -> Duration {
        Duration::from_millis(self.drag_grace_ms)
    }

    pub fn drag_timeout(&self) -> Duration {
        Duration::from_millis(self.drag_timeout_ms)
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
