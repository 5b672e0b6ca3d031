use super::*;
use crate::kernel::services::adapters::file::LocalStorage;
use std::sync::mpsc;
use std::time::Duration;
use tempfile::tempdir;

fn runtime() -> (AsyncRuntime, mpsc::Receiver<AppMessage>) {
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx, Arc::new(LocalStorage::default())).unwrap();
    (runtime, rx)
}

fn recv(rx: &mpsc::Receiver<AppMessage>) -> AppMessage {
    rx.recv_timeout(Duration::from_secs(5)).unwrap()
}

#[test]
fn load_tree_reports_request_and_nodes() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), "a").unwrap();
    let (runtime, rx) = runtime();

    runtime.load_tree(7, dir.path().to_path_buf(), 3);

    match recv(&rx) {
        AppMessage::TreeLoaded {
            request,
            path,
            result,
        } => {
            assert_eq!(request, 7);
            assert_eq!(path, dir.path());
            let nodes = result.unwrap();
            assert_eq!(nodes.len(), 1);
            assert_eq!(nodes[0].name, "a.txt");
        }
        other => panic!("unexpected message: {other:?}"),
    }
}

#[test]
fn load_content_failure_is_stringified() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.md");
    let (runtime, rx) = runtime();

    runtime.load_content(missing.clone(), ContentKind::Text, LoadReason::Open);

    match recv(&rx) {
        AppMessage::ContentLoaded {
            path,
            reason,
            result,
        } => {
            assert_eq!(path, missing);
            assert_eq!(reason, LoadReason::Open);
            assert!(result.unwrap_err().contains("not found"));
        }
        other => panic!("unexpected message: {other:?}"),
    }
}

#[test]
fn write_file_echoes_saved_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("note.md");
    std::fs::write(&path, "old").unwrap();
    let (runtime, rx) = runtime();

    runtime.write_file(path.clone(), "new".to_string());

    match recv(&rx) {
        AppMessage::FileSaved { content, result, .. } => {
            assert_eq!(content, "new");
            assert!(result.is_ok());
        }
        other => panic!("unexpected message: {other:?}"),
    }
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
}

#[test]
fn structural_ops_report_fs_op() {
    let dir = tempdir().unwrap();
    let folder = dir.path().join("docs");
    let (runtime, rx) = runtime();

    runtime.create_entry(folder.clone(), EntryKind::Directory);
    match recv(&rx) {
        AppMessage::FsOpFinished { op, result } => {
            assert_eq!(
                op,
                FsOp::Create {
                    path: folder.clone(),
                    kind: EntryKind::Directory
                }
            );
            assert!(result.is_ok());
        }
        other => panic!("unexpected message: {other:?}"),
    }

    runtime.rename_or_move(dir.path().join("nope"), dir.path().join("other"));
    match recv(&rx) {
        AppMessage::FsOpFinished { op, result } => {
            assert_eq!(op.name(), "rename_or_move");
            assert!(result.is_err());
        }
        other => panic!("unexpected message: {other:?}"),
    }

    runtime.delete_entry(folder.clone());
    match recv(&rx) {
        AppMessage::FsOpFinished { result, .. } => assert!(result.is_ok()),
        other => panic!("unexpected message: {other:?}"),
    }
    assert!(!folder.exists());
}

#[test]
fn messages_convert_to_actions() {
    let action: crate::kernel::Action = AppMessage::FileSaved {
        path: PathBuf::from("/w/a.md"),
        content: "x".to_string(),
        result: Err("denied".to_string()),
    }
    .into();
    assert!(matches!(
        action,
        crate::kernel::Action::FileSaveFailed { ref error, .. } if error == "denied"
    ));
}
