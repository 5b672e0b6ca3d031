//! Data models shared by the kernel and the adapters.

pub mod file_node;
pub mod geom;

pub use file_node::{
    compare_entries, count_nodes, filter_tree, find_node, is_same_or_descendant,
    is_valid_entry_name, rebase_path, should_ignore, sort_nodes, FileNode,
};
pub use geom::{Pos, Rect};
