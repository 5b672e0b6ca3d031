//! Path-keyed snapshot of the workspace directory tree.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// One filesystem entry as last observed by a tree load.
///
/// Directories always carry `children`; a directory cut off by the load depth
/// is present with an empty child list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    #[serde(default)]
    pub children: Vec<FileNode>,
}

impl FileNode {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: file_name_of(&path),
            path,
            is_dir: false,
            children: Vec::new(),
        }
    }

    pub fn dir(path: impl Into<PathBuf>, children: Vec<FileNode>) -> Self {
        let path = path.into();
        Self {
            name: file_name_of(&path),
            path,
            is_dir: true,
            children,
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

const ALWAYS_IGNORED: &[&str] = &["Thumbs.db", "desktop.ini"];

/// Entries never shown in the tree: dotfiles, OS litter and any configured name.
pub fn should_ignore(name: &str, extra: &[String]) -> bool {
    name.starts_with('.')
        || ALWAYS_IGNORED.contains(&name)
        || extra.iter().any(|ignored| ignored == name)
}

/// Directories first, then case-insensitive by name.
pub fn compare_entries(a_is_dir: bool, a_name: &str, b_is_dir: bool, b_name: &str) -> Ordering {
    b_is_dir
        .cmp(&a_is_dir)
        .then_with(|| a_name.to_lowercase().cmp(&b_name.to_lowercase()))
        .then_with(|| a_name.cmp(b_name))
}

pub fn sort_nodes(nodes: &mut [FileNode]) {
    nodes.sort_by(|a, b| compare_entries(a.is_dir, &a.name, b.is_dir, &b.name));
}

pub fn find_node<'a>(nodes: &'a [FileNode], path: &Path) -> Option<&'a FileNode> {
    for node in nodes {
        if node.path == path {
            return Some(node);
        }
        if node.is_dir && path.starts_with(&node.path) {
            if let Some(found) = find_node(&node.children, path) {
                return Some(found);
            }
        }
    }
    None
}

pub fn count_nodes(nodes: &[FileNode]) -> usize {
    nodes
        .iter()
        .map(|node| 1 + count_nodes(&node.children))
        .sum()
}

/// Keeps nodes whose name contains `query` (case-insensitive) plus every
/// ancestor directory needed to reach them. An empty query keeps everything.
pub fn filter_tree(nodes: &[FileNode], query: &str) -> Vec<FileNode> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return nodes.to_vec();
    }
    filter_nodes(nodes, &query)
}

fn filter_nodes(nodes: &[FileNode], query: &str) -> Vec<FileNode> {
    let mut out = Vec::new();
    for node in nodes {
        if node.name.to_lowercase().contains(query) {
            out.push(node.clone());
            continue;
        }
        if node.is_dir {
            let children = filter_nodes(&node.children, query);
            if !children.is_empty() {
                out.push(FileNode {
                    children,
                    ..node.clone()
                });
            }
        }
    }
    out
}

/// `path` is `ancestor` itself or lies somewhere below it.
pub fn is_same_or_descendant(path: &Path, ancestor: &Path) -> bool {
    path.starts_with(ancestor)
}

/// Rewrites `path` from under `from` to under `to`; `None` if it is not under `from`.
pub fn rebase_path(path: &Path, from: &Path, to: &Path) -> Option<PathBuf> {
    if path == from {
        return Some(to.to_path_buf());
    }
    let rel = path.strip_prefix(from).ok()?;
    Some(to.join(rel))
}

/// A single path component usable as a new entry name.
pub fn is_valid_entry_name(name: &str) -> bool {
    !name.trim().is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0')
}

#[cfg(test)]
#[path = "../../tests/unit/models/file_node.rs"]
mod tests;
