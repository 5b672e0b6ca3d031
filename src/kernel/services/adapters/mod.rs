//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod app_dirs;
pub mod file;
pub mod file_watcher;
pub mod runtime;
pub mod settings;

pub use app_dirs::{ensure_log_dir, get_app_data_dir, get_log_dir};
pub use file::LocalStorage;
pub use file_watcher::{FileChangeEvent, WorkspaceWatcher};
pub use runtime::{AppMessage, AsyncRuntime};
pub use settings::{ensure_settings_file, get_settings_path, load_settings, load_settings_from};
