//! Plain-text rendering of the workspace tree with change badges.

use crate::kernel::{ChangeKind, ChangeRecord, WorkspaceState};
use crate::models::{count_nodes, filter_tree, find_node, FileNode};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub depth: usize,
    pub name: String,
    pub is_dir: bool,
    pub change: Option<ChangeKind>,
    /// Directory with a change marker somewhere below it.
    pub has_child_changes: bool,
    pub is_selected: bool,
    /// Folder currently under the dragged pointer.
    pub is_drop_target: bool,
}

/// What the tree highlights besides change markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowMarks<'a> {
    pub selected: Option<&'a Path>,
    pub drop_target: Option<&'a Path>,
}

/// Depth-first rows for `nodes`, narrowed to `query` matches (and their ancestors).
pub fn flatten_rows(
    nodes: &[FileNode],
    changes: &ChangeRecord,
    marks: RowMarks<'_>,
    query: &str,
) -> Vec<TreeRow> {
    let visible = filter_tree(nodes, query);
    let mut rows = Vec::new();
    push_rows(&visible, 0, changes, marks, &mut rows);
    rows
}

fn push_rows(
    nodes: &[FileNode],
    depth: usize,
    changes: &ChangeRecord,
    marks: RowMarks<'_>,
    rows: &mut Vec<TreeRow>,
) {
    for node in nodes {
        rows.push(TreeRow {
            depth,
            name: node.name.clone(),
            is_dir: node.is_dir,
            change: changes.kind(&node.path),
            has_child_changes: node.is_dir && changes.has_changed_descendant(&node.path),
            is_selected: marks.selected == Some(node.path.as_path()),
            is_drop_target: node.is_dir && marks.drop_target == Some(node.path.as_path()),
        });
        push_rows(&node.children, depth + 1, changes, marks, rows);
    }
}

pub fn render_row(row: &TreeRow) -> String {
    let indent = "  ".repeat(row.depth);
    let cursor = if row.is_selected { "> " } else { "  " };
    let icon = if row.is_dir { "▸ " } else { "  " };
    let mut text = format!("{cursor}{indent}{icon}{}", row.name);
    if row.is_dir {
        text.push('/');
    }
    if row.is_drop_target {
        text.push_str(" ⇐");
    }
    if let Some(kind) = row.change {
        text.push(' ');
        text.push(kind.badge());
    } else if row.has_child_changes {
        text.push_str(" •");
    }
    text
}

/// The whole tree of `state`, one line per row, plus status lines.
///
/// Marked paths missing from the tree (removed since the last refresh) are
/// listed after it so their markers stay visible.
pub fn render_tree(state: &WorkspaceState, drop_target: Option<&Path>, query: &str) -> String {
    let session = &state.session;
    let Some(root) = session.root.as_deref() else {
        return "no workspace open\n".to_string();
    };
    let mut out = format!("{}\n", root.display());
    if session.is_loading && session.tree.is_empty() {
        out.push_str("  loading…\n");
        return out;
    }
    if let Some(error) = &session.load_error {
        out.push_str(&format!("  could not load: {error}\n"));
        return out;
    }
    let marks = RowMarks {
        selected: state.selected_path(),
        drop_target,
    };
    let rows = flatten_rows(&session.tree, &state.changes, marks, query);
    for row in &rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    for (path, kind) in state.changes.sorted() {
        if find_node(&session.tree, &path).is_none() {
            out.push_str(&format!("  {} {}\n", kind.badge(), path.display()));
        }
    }
    out.push_str(&format!("  {} entries", count_nodes(&session.tree)));
    if !state.changes.is_empty() {
        out.push_str(&format!(", {} changed since opened", state.changes.len()));
    }
    out.push('\n');
    if let Some(error) = &state.last_error {
        out.push_str(&format!(
            "  {} failed for {}: {}\n",
            error.op,
            error.path.display(),
            error.message
        ));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/app/tree_view.rs"]
mod tests;
