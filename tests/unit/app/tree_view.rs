use super::*;
use crate::kernel::services::ports::WorkspaceSettings;
use std::path::PathBuf;

fn sample_tree() -> Vec<FileNode> {
    vec![
        FileNode::dir(
            "/w/src",
            vec![FileNode::file("/w/src/lib.rs"), FileNode::file("/w/src/main.rs")],
        ),
        FileNode::file("/w/README.md"),
    ]
}

#[test]
fn rows_carry_depth_badges_and_descendant_flag() {
    let mut changes = ChangeRecord::default();
    changes.mark(PathBuf::from("/w/src/lib.rs"), ChangeKind::Modified);

    let marks = RowMarks {
        selected: Some(Path::new("/w/README.md")),
        drop_target: Some(Path::new("/w/src")),
    };
    let rows = flatten_rows(&sample_tree(), &changes, marks, "");

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].name, "src");
    assert!(rows[0].has_child_changes);
    assert_eq!(rows[0].change, None);
    assert_eq!(rows[1].depth, 1);
    assert_eq!(rows[1].change, Some(ChangeKind::Modified));
    assert!(rows[3].is_selected);
    assert!(rows[0].is_drop_target);
    assert!(!rows[3].is_drop_target);
}

#[test]
fn query_keeps_matching_rows_and_ancestors() {
    let rows = flatten_rows(&sample_tree(), &ChangeRecord::default(), RowMarks::default(), "MAIN");
    let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["src", "main.rs"]);
}

#[test]
fn render_row_shows_badge_or_dot() {
    let row = TreeRow {
        depth: 1,
        name: "a.txt".to_string(),
        is_dir: false,
        change: Some(ChangeKind::Created),
        has_child_changes: false,
        is_selected: false,
        is_drop_target: false,
    };
    assert_eq!(render_row(&row), "      a.txt A");

    let dir = TreeRow {
        depth: 0,
        name: "src".to_string(),
        is_dir: true,
        change: None,
        has_child_changes: true,
        is_selected: true,
        is_drop_target: true,
    };
    assert_eq!(render_row(&dir), "> ▸ src/ ⇐ •");
}

#[test]
fn render_tree_without_root() {
    let state = WorkspaceState::new(WorkspaceSettings::default());
    assert_eq!(render_tree(&state, None, ""), "no workspace open\n");
}

#[test]
fn render_tree_lists_rows_and_change_count() {
    let mut state = WorkspaceState::new(WorkspaceSettings::default());
    state.session.root = Some(PathBuf::from("/w"));
    state.session.tree = sample_tree();
    state
        .changes
        .mark(PathBuf::from("/w/README.md"), ChangeKind::Removed);

    let text = render_tree(&state, None, "");
    assert!(text.starts_with("/w\n"));
    assert!(text.contains("README.md D\n"));
    assert!(text.contains("4 entries, 1 changed since opened"));
}

#[test]
fn render_tree_keeps_markers_of_entries_gone_from_tree() {
    let mut state = WorkspaceState::new(WorkspaceSettings::default());
    state.session.root = Some(PathBuf::from("/w"));
    state.session.tree = sample_tree();
    state
        .changes
        .mark(PathBuf::from("/w/old.txt"), ChangeKind::Removed);
    state
        .changes
        .mark(PathBuf::from("/w/src/lib.rs"), ChangeKind::Modified);

    let text = render_tree(&state, None, "");
    assert!(text.contains("  D /w/old.txt\n"));
    assert!(!text.contains("M /w/src/lib.rs"));
    assert!(text.contains("4 entries, 2 changed since opened\n"));
}
