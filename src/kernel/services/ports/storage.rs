//! Storage collaborator contract: directory listing and file bytes.
//!
//! Calls are blocking; the async runtime adapter moves them onto tokio's
//! blocking pool so the thread that owns the kernel store never waits on disk.

use crate::models::FileNode;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("not found: {0}")]
    NotFound(PathBuf),
    #[error("already exists: {0}")]
    AlreadyExists(PathBuf),
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("file too large ({size} bytes, limit {limit}): {path}")]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
    #[error("invalid entry name: {0:?}")]
    InvalidName(String),
    #[error("failed to watch {path}: {message}")]
    WatchFailed { path: PathBuf, message: String },
}

impl StorageError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::AlreadyExists => StorageError::AlreadyExists(path.to_path_buf()),
            _ => StorageError::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

pub trait WorkspaceStorage: Send + Sync {
    /// Nodes below `root` (not including `root` itself), sorted, down to `max_depth`.
    fn read_directory_tree(&self, root: &Path, max_depth: u32) -> Result<Vec<FileNode>>;

    fn read_file_text(&self, path: &Path) -> Result<String>;

    /// A `data:` URL suitable for an image/media/pdf preview.
    fn read_file_renderable(&self, path: &Path) -> Result<String>;

    fn write_file_text(&self, path: &Path, content: &str) -> Result<()>;

    fn create_file(&self, path: &Path) -> Result<()>;

    fn create_directory(&self, path: &Path) -> Result<()>;

    fn delete_entry(&self, path: &Path) -> Result<()>;

    fn rename_or_move(&self, from: &Path, to: &Path) -> Result<()>;

    fn entry_size(&self, path: &Path) -> Result<u64>;
}
