use super::*;

fn sample_tree() -> Vec<FileNode> {
    vec![
        FileNode::dir(
            "/proj/src",
            vec![
                FileNode::file("/proj/src/main.rs"),
                FileNode::dir(
                    "/proj/src/kernel",
                    vec![FileNode::file("/proj/src/kernel/store.rs")],
                ),
            ],
        ),
        FileNode::dir("/proj/docs", vec![FileNode::file("/proj/docs/README.md")]),
        FileNode::file("/proj/Cargo.toml"),
    ]
}

#[test]
fn file_and_dir_constructors_derive_name_from_path() {
    let file = FileNode::file("/proj/a.ts");
    assert_eq!(file.name, "a.ts");
    assert!(!file.is_dir);

    let dir = FileNode::dir("/proj/src", Vec::new());
    assert_eq!(dir.name, "src");
    assert!(dir.is_dir);
    assert!(dir.children.is_empty());
}

#[test]
fn should_ignore_hides_dotfiles_and_configured_names() {
    let extra = vec!["node_modules".to_string()];
    assert!(should_ignore(".git", &extra));
    assert!(should_ignore(".env", &extra));
    assert!(should_ignore("Thumbs.db", &extra));
    assert!(should_ignore("node_modules", &extra));
    assert!(!should_ignore("src", &extra));
    assert!(!should_ignore("target", &extra));
}

#[test]
fn sort_nodes_puts_directories_first_then_case_insensitive_names() {
    let mut nodes = vec![
        FileNode::file("/p/b.txt"),
        FileNode::dir("/p/Zeta", Vec::new()),
        FileNode::file("/p/A.txt"),
        FileNode::dir("/p/alpha", Vec::new()),
    ];
    sort_nodes(&mut nodes);
    let names: Vec<_> = nodes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "Zeta", "A.txt", "b.txt"]);
}

#[test]
fn find_node_descends_only_into_matching_directories() {
    let tree = sample_tree();
    let found = find_node(&tree, Path::new("/proj/src/kernel/store.rs")).unwrap();
    assert_eq!(found.name, "store.rs");
    assert!(find_node(&tree, Path::new("/proj/src/missing.rs")).is_none());
}

#[test]
fn count_nodes_counts_every_entry() {
    assert_eq!(count_nodes(&sample_tree()), 7);
}

#[test]
fn filter_tree_keeps_ancestors_of_matches() {
    let filtered = filter_tree(&sample_tree(), "STORE");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "src");
    assert_eq!(filtered[0].children.len(), 1);
    assert_eq!(filtered[0].children[0].name, "kernel");
    assert_eq!(filtered[0].children[0].children[0].name, "store.rs");
}

#[test]
fn filter_tree_with_blank_query_is_identity() {
    assert_eq!(filter_tree(&sample_tree(), "  "), sample_tree());
}

#[test]
fn rebase_path_moves_descendants() {
    let from = Path::new("/proj/old");
    let to = Path::new("/proj/new");
    assert_eq!(
        rebase_path(Path::new("/proj/old"), from, to),
        Some(PathBuf::from("/proj/new"))
    );
    assert_eq!(
        rebase_path(Path::new("/proj/old/a/b.rs"), from, to),
        Some(PathBuf::from("/proj/new/a/b.rs"))
    );
    assert_eq!(rebase_path(Path::new("/proj/older/x"), from, to), None);
}

#[test]
fn entry_name_validation_rejects_separators_and_dots() {
    assert!(is_valid_entry_name("notes.md"));
    assert!(!is_valid_entry_name(""));
    assert!(!is_valid_entry_name("   "));
    assert!(!is_valid_entry_name("."));
    assert!(!is_valid_entry_name(".."));
    assert!(!is_valid_entry_name("a/b"));
    assert!(!is_valid_entry_name("a\\b"));
}
