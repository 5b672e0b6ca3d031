//! Workspace storage on the local filesystem.

use crate::kernel::services::ports::{
    StorageError, StorageResult as Result, WorkspaceSettings, WorkspaceStorage,
};
use crate::models::{is_valid_entry_name, should_ignore, sort_nodes, FileNode};
use base64::Engine as _;
use std::fs;
use std::path::Path;

pub struct LocalStorage {
    max_text_bytes: u64,
    max_renderable_bytes: u64,
    ignored_names: Vec<String>,
}

impl LocalStorage {
    pub fn new(settings: &WorkspaceSettings) -> Self {
        Self {
            max_text_bytes: settings.max_text_bytes,
            max_renderable_bytes: settings.max_renderable_bytes,
            ignored_names: settings.ignored_names.clone(),
        }
    }

    fn read_level(&self, dir: &Path, depth: u32, max_depth: u32) -> Vec<FileNode> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(path = %dir.display(), error = %e, "skipping unreadable directory");
                return Vec::new();
            }
        };

        let mut nodes = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            if should_ignore(&name, &self.ignored_names) {
                continue;
            }
            let path = entry.path();
            // Follows symlinks, matching what a file browser shows.
            if path.is_dir() {
                let children = if depth < max_depth {
                    self.read_level(&path, depth + 1, max_depth)
                } else {
                    Vec::new()
                };
                nodes.push(FileNode::dir(path, children));
            } else {
                nodes.push(FileNode::file(path));
            }
        }
        sort_nodes(&mut nodes);
        nodes
    }

    fn checked_size(&self, path: &Path, limit: u64) -> Result<u64> {
        if path.is_dir() {
            return Err(StorageError::io(path, std::io::Error::other("is a directory")));
        }
        let size = self.entry_size(path)?;
        if size > limit {
            return Err(StorageError::TooLarge {
                path: path.to_path_buf(),
                size,
                limit,
            });
        }
        Ok(size)
    }
}

/// Final component of a path about to be created; rejects what the tree
/// could never show or address.
fn validate_entry_name(path: &Path) -> Result<()> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    if is_valid_entry_name(&name) {
        Ok(())
    } else {
        Err(StorageError::InvalidName(name))
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(&WorkspaceSettings::default())
    }
}

impl WorkspaceStorage for LocalStorage {
    fn read_directory_tree(&self, root: &Path, max_depth: u32) -> Result<Vec<FileNode>> {
        let metadata = fs::metadata(root).map_err(|e| StorageError::io(root, e))?;
        if !metadata.is_dir() {
            return Err(StorageError::NotADirectory(root.to_path_buf()));
        }
        Ok(self.read_level(root, 0, max_depth))
    }

    fn read_file_text(&self, path: &Path) -> Result<String> {
        self.checked_size(path, self.max_text_bytes)?;
        let bytes = fs::read(path).map_err(|e| StorageError::io(path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn read_file_renderable(&self, path: &Path) -> Result<String> {
        self.checked_size(path, self.max_renderable_bytes)?;
        let bytes = fs::read(path).map_err(|e| StorageError::io(path, e))?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Ok(format!("data:{};base64,{}", mime_for_path(path), encoded))
    }

    fn write_file_text(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).map_err(|e| StorageError::io(path, e))
    }

    fn create_file(&self, path: &Path) -> Result<()> {
        validate_entry_name(path)?;
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map(|_| ())
            .map_err(|e| StorageError::io(path, e))
    }

    fn create_directory(&self, path: &Path) -> Result<()> {
        validate_entry_name(path)?;
        if path.exists() {
            return Err(StorageError::AlreadyExists(path.to_path_buf()));
        }
        fs::create_dir_all(path).map_err(|e| StorageError::io(path, e))
    }

    fn delete_entry(&self, path: &Path) -> Result<()> {
        let metadata = fs::symlink_metadata(path).map_err(|e| StorageError::io(path, e))?;
        if metadata.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        }
        .map_err(|e| StorageError::io(path, e))
    }

    fn rename_or_move(&self, from: &Path, to: &Path) -> Result<()> {
        validate_entry_name(to)?;
        if fs::symlink_metadata(from).is_err() {
            return Err(StorageError::NotFound(from.to_path_buf()));
        }
        // rename(2) silently replaces an existing file.
        if fs::symlink_metadata(to).is_ok() {
            return Err(StorageError::AlreadyExists(to.to_path_buf()));
        }
        fs::rename(from, to).map_err(|e| StorageError::io(from, e))
    }

    fn entry_size(&self, path: &Path) -> Result<u64> {
        fs::metadata(path)
            .map(|m| m.len())
            .map_err(|e| StorageError::io(path, e))
    }
}

/// Media type used for `data:` URLs, keyed by lowercase extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/file/local.rs"]
mod tests;
