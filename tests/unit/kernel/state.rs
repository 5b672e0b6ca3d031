use super::*;

#[test]
fn content_kind_uses_case_insensitive_extension() {
    assert_eq!(
        ContentKind::for_path(Path::new("/p/logo.PNG")),
        ContentKind::Renderable
    );
    assert_eq!(
        ContentKind::for_path(Path::new("/p/report.pdf")),
        ContentKind::Renderable
    );
    assert_eq!(
        ContentKind::for_path(Path::new("/p/main.rs")),
        ContentKind::Text
    );
    assert_eq!(
        ContentKind::for_path(Path::new("/p/Makefile")),
        ContentKind::Text
    );
}

#[test]
fn dirty_is_derived_from_buffer_and_displayed_content() {
    let mut file = OpenFileState::opening(PathBuf::from("/p/a.ts"));
    assert!(!file.is_dirty());

    file.displayed_content = Some("x".to_string());
    file.edit_buffer = Some("x".to_string());
    assert!(!file.is_dirty());

    file.edit_buffer = Some("z".to_string());
    assert!(file.is_dirty());

    file.edit_buffer = None;
    assert!(!file.is_dirty());
}

#[test]
fn opening_resets_to_preview_and_loading() {
    let file = OpenFileState::opening(PathBuf::from("/p/a.ts"));
    assert_eq!(file.preview_mode, PreviewMode::Preview);
    assert!(file.is_loading);
    assert!(file.displayed_content.is_none());
    assert!(file.edit_buffer.is_none());
}

#[test]
fn session_requests_are_monotonic() {
    let mut session = WorkspaceSession::default();
    let a = session.issue_request();
    let b = session.issue_request();
    assert!(b > a);
}

#[test]
fn session_contains_only_paths_under_root() {
    let mut session = WorkspaceSession::default();
    assert!(!session.contains_path(Path::new("/proj/a")));
    session.root = Some(PathBuf::from("/proj"));
    assert!(session.contains_path(Path::new("/proj/a")));
    assert!(!session.contains_path(Path::new("/project/a")));
}

#[test]
fn requires_confirmation_tracks_dirty_file() {
    let mut state = WorkspaceState::new(WorkspaceSettings::default());
    assert!(!state.requires_confirmation());

    let mut file = OpenFileState::opening(PathBuf::from("/p/a.ts"));
    file.displayed_content = Some("x".to_string());
    file.edit_buffer = Some("y".to_string());
    state.open_file = Some(file);
    assert!(state.requires_confirmation());
}
