use super::app_dirs::get_app_data_dir;
use crate::kernel::services::ports::WorkspaceSettings;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.json";

pub fn get_settings_path() -> Option<PathBuf> {
    get_app_data_dir().map(|dir| dir.join(SETTINGS_FILE))
}

pub fn ensure_settings_file() -> std::io::Result<PathBuf> {
    let path = get_settings_path().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine settings directory",
        )
    })?;
    write_default_settings(&path)?;
    Ok(path)
}

/// Settings from the user's file, or defaults when it is missing or unreadable.
pub fn load_settings() -> WorkspaceSettings {
    match get_settings_path() {
        Some(path) => load_settings_from(&path),
        None => WorkspaceSettings::default(),
    }
}

pub fn load_settings_from(path: &Path) -> WorkspaceSettings {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return WorkspaceSettings::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read settings, using defaults");
            return WorkspaceSettings::default();
        }
    };
    serde_json::from_str(&data).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "invalid settings, using defaults");
        WorkspaceSettings::default()
    })
}

fn write_default_settings(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content = serde_json::to_string_pretty(&WorkspaceSettings::default())
            .unwrap_or_else(|_| "{}".to_string());
        std::fs::write(path, content)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
