use super::*;
use notify::event::{CreateKind, DataChange, RemoveKind};
use tempfile::tempdir;

fn event(kind: EventKind, paths: &[&str]) -> notify::Event {
    paths
        .iter()
        .fold(notify::Event::new(kind), |event, path| event.add_path(PathBuf::from(path)))
}

fn service_with_raw_channel(root: &Path) -> (WorkspaceWatcher, mpsc::Sender<notify::Event>) {
    let (tx, rx) = mpsc::channel();
    let watcher = RecommendedWatcher::new(
        |_: Result<notify::Event, notify::Error>| {},
        Config::default().with_poll_interval(WATCHER_POLL_INTERVAL),
    )
    .unwrap();
    (
        WorkspaceWatcher {
            watcher,
            raw_event_rx: rx,
            watched: Some(WatchedRoot {
                root: root.to_path_buf(),
                canonical: root.to_path_buf(),
            }),
            ignored_names: vec!["node_modules".to_string()],
        },
        tx,
    )
}

#[test]
fn create_remove_modify_map_to_markers() {
    let created = normalize_notify_event(event(
        EventKind::Create(CreateKind::File),
        &["/w/a.txt", "/w/b.txt"],
    ));
    assert_eq!(
        created,
        vec![FileChangeEvent {
            paths: vec![PathBuf::from("/w/a.txt"), PathBuf::from("/w/b.txt")],
            kind: ChangeKind::Created,
        }]
    );

    let removed = normalize_notify_event(event(EventKind::Remove(RemoveKind::Any), &["/w/a.txt"]));
    assert_eq!(removed[0].kind, ChangeKind::Removed);

    let modified = normalize_notify_event(event(
        EventKind::Modify(ModifyKind::Data(DataChange::Content)),
        &["/w/a.txt"],
    ));
    assert_eq!(modified[0].kind, ChangeKind::Modified);
}

#[test]
fn rename_both_splits_into_removed_and_created() {
    let changes = normalize_notify_event(event(
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
        &["/w/old.txt", "/w/new.txt"],
    ));
    assert_eq!(
        changes,
        vec![
            FileChangeEvent {
                paths: vec![PathBuf::from("/w/old.txt")],
                kind: ChangeKind::Removed,
            },
            FileChangeEvent {
                paths: vec![PathBuf::from("/w/new.txt")],
                kind: ChangeKind::Created,
            },
        ]
    );
}

#[test]
fn rename_halves_map_by_direction() {
    let from = normalize_notify_event(event(
        EventKind::Modify(ModifyKind::Name(RenameMode::From)),
        &["/w/old.txt"],
    ));
    assert_eq!(from[0].kind, ChangeKind::Removed);

    let to = normalize_notify_event(event(
        EventKind::Modify(ModifyKind::Name(RenameMode::To)),
        &["/w/new.txt"],
    ));
    assert_eq!(to[0].kind, ChangeKind::Created);
}

#[test]
fn access_events_are_dropped() {
    let changes = normalize_notify_event(event(
        EventKind::Access(notify::event::AccessKind::Any),
        &["/w/a.txt"],
    ));
    assert!(changes.is_empty());
}

#[test]
fn drain_filters_ignored_and_foreign_paths() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let (mut service, tx) = service_with_raw_channel(root);

    let inside = root.join("src/lib.rs");
    let ignored = root.join("node_modules/pkg/index.js");
    let hidden = root.join(".git/index");
    tx.send(
        notify::Event::new(EventKind::Create(CreateKind::File))
            .add_path(inside.clone())
            .add_path(ignored)
            .add_path(hidden)
            .add_path(PathBuf::from("/elsewhere/file.txt")),
    )
    .unwrap();

    let events = service.drain_events();
    assert_eq!(
        events,
        vec![FileChangeEvent {
            paths: vec![inside],
            kind: ChangeKind::Created,
        }]
    );
    assert!(service.drain_events().is_empty());
}

#[test]
fn unwatch_discards_queued_events() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let (mut service, tx) = service_with_raw_channel(root);
    tx.send(
        notify::Event::new(EventKind::Remove(RemoveKind::File)).add_path(root.join("a.txt")),
    )
    .unwrap();

    assert!(!service.unwatch(Path::new("/not/watched")));
    assert!(service.unwatch(root));
    assert!(service.watched_root().is_none());
    assert!(service.drain_events().is_empty());
}

#[test]
fn watch_real_directory_reports_root() {
    let dir = tempdir().unwrap();
    let mut service = WorkspaceWatcher::new(Vec::new()).unwrap();
    service.watch(dir.path()).unwrap();
    assert_eq!(service.watched_root(), Some(dir.path()));

    let err = service.watch(&dir.path().join("missing")).unwrap_err();
    assert!(matches!(err, StorageError::WatchFailed { .. }));
    assert!(service.watched_root().is_none());
}
