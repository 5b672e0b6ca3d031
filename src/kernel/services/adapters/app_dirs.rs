//! Per-user data directory for settings and logs:
//! - macOS: ~/Library/Application Support/workspace-sync
//! - Linux: $XDG_DATA_HOME/workspace-sync or ~/.local/share/workspace-sync
//! - Windows: %APPDATA%\workspace-sync

use std::io;
use std::path::PathBuf;

pub(crate) const APP_NAME: &str = "workspace-sync";
const LOG_DIR: &str = "logs";

pub fn get_app_data_dir() -> Option<PathBuf> {
    resolve_app_data_dir(|key| std::env::var(key).ok())
}

/// Platform lookup with the environment injected.
pub(crate) fn resolve_app_data_dir(env: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    let non_empty = |key: &str| env(key).filter(|value| !value.is_empty()).map(PathBuf::from);

    let base = if cfg!(target_os = "macos") {
        non_empty("HOME").map(|home| home.join("Library/Application Support"))
    } else if cfg!(target_os = "windows") {
        non_empty("APPDATA")
    } else if cfg!(target_os = "linux") {
        non_empty("XDG_DATA_HOME").or_else(|| non_empty("HOME").map(|home| home.join(".local/share")))
    } else {
        None
    };
    base.map(|dir| dir.join(APP_NAME))
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|dir| dir.join(LOG_DIR))
}

pub fn ensure_log_dir() -> io::Result<PathBuf> {
    let dir = get_log_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "cannot determine log directory"))?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/app_dirs.rs"]
mod tests;
