use super::*;
use std::fs::File;
use tempfile::tempdir;

fn names(nodes: &[FileNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.name.as_str()).collect()
}

#[test]
fn test_tree_sorts_dirs_first_and_skips_ignored() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    fs::create_dir(dir.path().join("node_modules")).unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    File::create(dir.path().join("b.md")).unwrap();
    File::create(dir.path().join("A.md")).unwrap();
    File::create(dir.path().join(".env")).unwrap();
    File::create(dir.path().join("src/main.rs")).unwrap();

    let storage = LocalStorage::default();
    let tree = storage.read_directory_tree(dir.path(), 3).unwrap();

    assert_eq!(names(&tree), vec!["src", "A.md", "b.md"]);
    assert!(tree[0].is_dir);
    assert_eq!(names(&tree[0].children), vec!["main.rs"]);
    assert_eq!(tree[0].children[0].path, dir.path().join("src/main.rs"));
}

#[test]
fn test_tree_stops_at_max_depth() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("a/b/c")).unwrap();
    File::create(dir.path().join("a/b/c/deep.txt")).unwrap();

    let storage = LocalStorage::default();
    let tree = storage.read_directory_tree(dir.path(), 1).unwrap();

    let a = &tree[0];
    let b = &a.children[0];
    assert_eq!(b.name, "b");
    assert!(b.is_dir);
    assert!(b.children.is_empty());
}

#[test]
fn test_tree_of_missing_root_fails() {
    let dir = tempdir().unwrap();
    let storage = LocalStorage::default();
    let err = storage
        .read_directory_tree(&dir.path().join("missing"), 3)
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));
}

#[test]
fn test_text_read_respects_limit() {
    let dir = tempdir().unwrap();
    let small = dir.path().join("small.txt");
    let big = dir.path().join("big.txt");
    fs::write(&small, "hello").unwrap();
    fs::write(&big, "x".repeat(64)).unwrap();

    let settings = WorkspaceSettings {
        max_text_bytes: 32,
        ..WorkspaceSettings::default()
    };
    let storage = LocalStorage::new(&settings);

    assert_eq!(storage.read_file_text(&small).unwrap(), "hello");
    let err = storage.read_file_text(&big).unwrap_err();
    assert!(matches!(err, StorageError::TooLarge { size: 64, limit: 32, .. }));
}

#[test]
fn test_renderable_read_is_data_url() {
    let dir = tempdir().unwrap();
    let image = dir.path().join("dot.PNG");
    fs::write(&image, [1u8, 2, 3]).unwrap();

    let storage = LocalStorage::default();
    let url = storage.read_file_renderable(&image).unwrap();
    assert_eq!(url, "data:image/png;base64,AQID");
}

#[test]
fn test_mime_fallback() {
    assert_eq!(mime_for_path(Path::new("/a/clip.mov")), "video/quicktime");
    assert_eq!(mime_for_path(Path::new("/a/logo.svg")), "image/svg+xml");
    assert_eq!(mime_for_path(Path::new("/a/data.bin")), "application/octet-stream");
    assert_eq!(mime_for_path(Path::new("/a/noext")), "application/octet-stream");
}

#[test]
fn test_create_delete_entries() {
    let dir = tempdir().unwrap();
    let storage = LocalStorage::default();
    let file = dir.path().join("new.txt");
    let folder = dir.path().join("nested");

    storage.create_file(&file).unwrap();
    assert!(file.is_file());
    assert!(matches!(
        storage.create_file(&file).unwrap_err(),
        StorageError::AlreadyExists(_)
    ));

    storage.create_directory(&folder).unwrap();
    File::create(folder.join("inner.txt")).unwrap();
    assert!(matches!(
        storage.create_directory(&folder).unwrap_err(),
        StorageError::AlreadyExists(_)
    ));

    storage.delete_entry(&folder).unwrap();
    storage.delete_entry(&file).unwrap();
    assert!(!folder.exists());
    assert!(!file.exists());
    assert!(matches!(
        storage.delete_entry(&file).unwrap_err(),
        StorageError::NotFound(_)
    ));
}

#[test]
fn test_rename_refuses_to_overwrite() {
    let dir = tempdir().unwrap();
    let storage = LocalStorage::default();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, "a").unwrap();
    fs::write(&b, "b").unwrap();

    let err = storage.rename_or_move(&a, &b).unwrap_err();
    assert!(matches!(err, StorageError::AlreadyExists(_)));
    assert_eq!(fs::read_to_string(&b).unwrap(), "b");

    let moved = dir.path().join("c.txt");
    storage.rename_or_move(&a, &moved).unwrap();
    assert!(!a.exists());
    assert_eq!(fs::read_to_string(&moved).unwrap(), "a");
}

#[test]
fn test_write_and_size() {
    let dir = tempdir().unwrap();
    let storage = LocalStorage::default();
    let path = dir.path().join("notes.md");

    storage.write_file_text(&path, "# hi\n").unwrap();
    assert_eq!(storage.entry_size(&path).unwrap(), 5);
    assert_eq!(storage.read_file_text(&path).unwrap(), "# hi\n");
}

#[test]
fn test_unaddressable_names_are_rejected() {
    let dir = tempdir().unwrap();
    let storage = LocalStorage::default();
    let a = dir.path().join("a.txt");
    fs::write(&a, "a").unwrap();

    assert!(matches!(
        storage.create_file(&dir.path().join(" ")).unwrap_err(),
        StorageError::InvalidName(_)
    ));
    assert!(matches!(
        storage.create_directory(&dir.path().join("..")).unwrap_err(),
        StorageError::InvalidName(_)
    ));
    assert!(matches!(
        storage.rename_or_move(&a, &dir.path().join("x\\y")).unwrap_err(),
        StorageError::InvalidName(_)
    ));
    assert!(a.exists());
}
