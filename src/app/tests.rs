use super::*;
use crate::ui::renderer;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use std::fs;
use tempfile::TempDir;

/// 좌/우 패널 디렉토리와 설정 디렉토리를 분리한 테스트 환경
struct Fixture {
    left: TempDir,
    right: TempDir,
    config: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            left: TempDir::new().unwrap(),
            right: TempDir::new().unwrap(),
            config: TempDir::new().unwrap(),
        }
    }

    fn app(&self) -> App {
        App::new_for_test(self.left.path(), self.right.path(), self.config.path())
    }

    fn settings_file(&self) -> PathBuf {
        self.config.path().join("settings.toml")
    }
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyModifiers::NONE, code);
}

fn press_with(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    app.handle_key(modifiers, code);
}

fn names(pane: &PaneModel) -> Vec<String> {
    pane.items().iter().map(|e| e.name.clone()).collect()
}

fn focused_name(app: &App) -> Option<String> {
    app.active_pane().focused().map(|e| e.name.clone())
}

fn focus(app: &mut App, name: &str) {
    assert!(app.active_pane_mut().focus_name(name), "{} not listed", name);
}

fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

// === 탐색 ===

#[test]
fn test_panes_list_parent_then_dirs_then_files() {
    let fx = Fixture::new();
    fs::write(fx.left.path().join("b.txt"), "b").unwrap();
    fs::write(fx.left.path().join("a.txt"), "a").unwrap();
    fs::create_dir(fx.left.path().join("zdir")).unwrap();

    let app = fx.app();
    assert_eq!(names(&app.left), vec!["..", "zdir", "a.txt", "b.txt"]);
    assert_eq!(app.active_panel(), ActivePanel::Left);
    assert!(app.left.selection().is_empty());
}

#[test]
fn test_enter_directory_and_back_focuses_child() {
    let fx = Fixture::new();
    fs::create_dir(fx.left.path().join("alpha")).unwrap();
    fs::create_dir(fx.left.path().join("beta")).unwrap();
    fs::write(fx.left.path().join("beta").join("inner.txt"), "x").unwrap();

    let mut app = fx.app();
    focus(&mut app, "beta");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.active_path(), fx.left.path().join("beta"));
    assert_eq!(names(&app.left), vec!["..", "inner.txt"]);
    assert_eq!(app.left.cursor(), 0);

    // ".." 위에서 Enter
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.active_path(), fx.left.path());
    assert_eq!(focused_name(&app).as_deref(), Some("beta"));
}

#[test]
fn test_tab_switches_active_pane() {
    let fx = Fixture::new();
    let mut app = fx.app();

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.active_panel(), ActivePanel::Right);
    assert_eq!(app.active_path(), fx.right.path());
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.active_panel(), ActivePanel::Left);
}

#[test]
fn test_cursor_keys_stay_in_range() {
    let fx = Fixture::new();
    for name in ["a", "b", "c"] {
        fs::write(fx.left.path().join(name), name).unwrap();
    }
    let mut app = fx.app();

    press(&mut app, KeyCode::Up);
    assert_eq!(app.left.cursor(), 0);
    press(&mut app, KeyCode::End);
    assert_eq!(app.left.cursor(), 3);
    press(&mut app, KeyCode::Down);
    assert_eq!(app.left.cursor(), 3);
    press(&mut app, KeyCode::PageUp);
    assert_eq!(app.left.cursor(), 0);
    press(&mut app, KeyCode::PageDown);
    assert_eq!(app.left.cursor(), 3);
    press(&mut app, KeyCode::Home);
    assert_eq!(app.left.cursor(), 0);
}

#[test]
fn test_unreadable_target_keeps_pane() {
    let fx = Fixture::new();
    let mut app = fx.app();
    let before = names(&app.left);

    let changed = app.change_active_dir(fx.left.path().join("missing"), None);
    assert!(!changed);
    assert_eq!(app.active_path(), fx.left.path());
    assert_eq!(names(&app.left), before);
    assert!(matches!(app.dialog, Some(DialogKind::Error { .. })));

    press(&mut app, KeyCode::Esc);
    assert!(app.dialog.is_none());
}

#[test]
fn test_quit_keys() {
    let fx = Fixture::new();
    let mut app = fx.app();
    press(&mut app, KeyCode::F(10));
    assert!(app.should_quit());

    let mut app = fx.app();
    press_with(&mut app, KeyModifiers::CONTROL, KeyCode::Char('c'));
    assert!(app.should_quit());
}

// === 정렬 / 새로고침 / 숨김 ===

#[test]
fn test_sort_by_size_toggles_and_persists() {
    let fx = Fixture::new();
    fs::write(fx.left.path().join("big.txt"), "x".repeat(300)).unwrap();
    fs::write(fx.left.path().join("small.txt"), "x").unwrap();
    fs::write(fx.left.path().join("mid.txt"), "x".repeat(20)).unwrap();

    let mut app = fx.app();
    press_with(&mut app, KeyModifiers::CONTROL, KeyCode::F(6));
    assert_eq!(app.left.sort(), SortDescriptor::new(SortKey::Size, true));
    assert_eq!(names(&app.left), vec!["..", "small.txt", "mid.txt", "big.txt"]);

    press_with(&mut app, KeyModifiers::CONTROL, KeyCode::F(6));
    assert_eq!(app.left.sort(), SortDescriptor::new(SortKey::Size, false));
    assert_eq!(names(&app.left), vec!["..", "big.txt", "mid.txt", "small.txt"]);
    assert_eq!(app.toast_display(), Some("Sort: Size ▼"));

    // 다음 실행의 기본값
    let saved = Settings::load_from(&fx.settings_file());
    assert_eq!(saved.sort_descriptor(), SortDescriptor::new(SortKey::Size, false));
    let reopened = fx.app();
    assert_eq!(reopened.left.sort(), SortDescriptor::new(SortKey::Size, false));
    assert_eq!(reopened.right.sort(), SortDescriptor::new(SortKey::Size, false));
}

#[test]
fn test_sort_keeps_marked_entries() {
    let fx = Fixture::new();
    fs::write(fx.left.path().join("a.rs"), "aaaa").unwrap();
    fs::write(fx.left.path().join("b.md"), "b").unwrap();

    let mut app = fx.app();
    focus(&mut app, "a.rs");
    press(&mut app, KeyCode::Char(' '));
    press_with(&mut app, KeyModifiers::CONTROL, KeyCode::F(4));

    assert_eq!(names(&app.left), vec!["..", "b.md", "a.rs"]);
    let marked: Vec<String> = app.left.selected_files().into_iter().map(|e| e.name).collect();
    assert_eq!(marked, vec!["a.rs"]);
}

#[test]
fn test_refresh_picks_up_changes_and_keeps_selection() {
    let fx = Fixture::new();
    fs::write(fx.left.path().join("keep.txt"), "k").unwrap();
    fs::write(fx.left.path().join("gone.txt"), "g").unwrap();

    let mut app = fx.app();
    press_with(&mut app, KeyModifiers::CONTROL, KeyCode::Char('a'));
    assert_eq!(app.left.selection().len(), 2);

    fs::remove_file(fx.left.path().join("gone.txt")).unwrap();
    fs::write(fx.left.path().join("added.txt"), "a").unwrap();
    press_with(&mut app, KeyModifiers::CONTROL, KeyCode::Char('r'));

    assert_eq!(names(&app.left), vec!["..", "added.txt", "keep.txt"]);
    let marked: Vec<String> = app.left.selected_files().into_iter().map(|e| e.name).collect();
    assert_eq!(marked, vec!["keep.txt"]);
    assert_eq!(app.toast_display(), Some("Refreshed"));
}

#[test]
fn test_toggle_hidden_applies_to_both_panes_and_persists() {
    let fx = Fixture::new();
    fs::write(fx.left.path().join(".secret"), "s").unwrap();
    fs::write(fx.right.path().join(".env"), "e").unwrap();

    let mut app = fx.app();
    assert!(!names(&app.left).contains(&".secret".to_string()));

    press_with(&mut app, KeyModifiers::CONTROL, KeyCode::Char('h'));
    assert!(names(&app.left).contains(&".secret".to_string()));
    assert!(names(&app.right).contains(&".env".to_string()));
    assert!(Settings::load_from(&fx.settings_file()).show_hidden);

    press_with(&mut app, KeyModifiers::CONTROL, KeyCode::Char('h'));
    assert!(!names(&app.right).contains(&".env".to_string()));
    assert!(!Settings::load_from(&fx.settings_file()).show_hidden);
}

// === 선택 ===

#[test]
fn test_selection_keys() {
    let fx = Fixture::new();
    for name in ["a", "b", "c"] {
        fs::write(fx.left.path().join(name), name).unwrap();
    }
    let mut app = fx.app();

    // ".."은 마킹되지 않고 커서만 내려감
    press(&mut app, KeyCode::Char(' '));
    assert!(app.left.selection().is_empty());
    assert_eq!(app.left.cursor(), 1);

    press(&mut app, KeyCode::Insert);
    assert_eq!(app.left.selection().iter().copied().collect::<Vec<_>>(), vec![1]);

    press(&mut app, KeyCode::Char('*'));
    assert_eq!(app.left.selection().iter().copied().collect::<Vec<_>>(), vec![2, 3]);

    press_with(&mut app, KeyModifiers::CONTROL, KeyCode::Char('d'));
    assert!(app.left.selection().is_empty());
}

// === 복사 / 이동 / 삭제 ===

#[test]
fn test_copy_with_confirmation() {
    let fx = Fixture::new();
    fs::write(fx.left.path().join("report.txt"), "hello").unwrap();
    fs::create_dir(fx.left.path().join("docs")).unwrap();
    fs::write(fx.left.path().join("docs").join("inner.md"), "# doc").unwrap();

    let mut app = fx.app();
    press_with(&mut app, KeyModifiers::CONTROL, KeyCode::Char('a'));
    press(&mut app, KeyCode::F(5));

    let Some(DialogKind::Confirm { title, message, .. }) = &app.dialog else {
        panic!("expected confirm dialog, got {:?}", app.dialog);
    };
    assert_eq!(title, "Copy");
    assert!(message.contains("2 items"));
    assert!(message.contains(&fx.right.path().display().to_string()));

    press(&mut app, KeyCode::Enter);
    assert!(app.dialog.is_none());
    assert_eq!(
        fs::read_to_string(fx.right.path().join("report.txt")).unwrap(),
        "hello"
    );
    assert_eq!(
        fs::read_to_string(fx.right.path().join("docs").join("inner.md")).unwrap(),
        "# doc"
    );
    // 원본은 그대로, 복사 후 원본 선택은 해제
    assert!(fx.left.path().join("report.txt").exists());
    assert!(app.left.selection().is_empty());

    // 대상 패널은 새로고침되고 복사된 항목이 선택됨
    let copied: Vec<String> = app.right.selected_files().into_iter().map(|e| e.name).collect();
    assert_eq!(copied, vec!["docs", "report.txt"]);
    assert!(app.toast_display().unwrap().starts_with("Copied 2 items"));
}

#[test]
fn test_cancelled_confirmation_does_nothing() {
    let fx = Fixture::new();
    fs::write(fx.left.path().join("a.txt"), "a").unwrap();

    let mut app = fx.app();
    focus(&mut app, "a.txt");
    press(&mut app, KeyCode::F(6));
    assert!(app.pending_operation.is_some());

    press(&mut app, KeyCode::Esc);
    assert!(app.dialog.is_none());
    assert!(app.pending_operation.is_none());
    assert!(fx.left.path().join("a.txt").exists());
    assert!(!fx.right.path().join("a.txt").exists());
}

#[test]
fn test_move_removes_source() {
    let fx = Fixture::new();
    fs::write(fx.left.path().join("a.txt"), "a").unwrap();
    fs::write(fx.left.path().join("b.txt"), "b").unwrap();

    let mut app = fx.app();
    app.settings.confirm_operations = false;
    focus(&mut app, "a.txt");
    press(&mut app, KeyCode::F(6));

    assert!(app.dialog.is_none());
    assert!(!fx.left.path().join("a.txt").exists());
    assert_eq!(fs::read_to_string(fx.right.path().join("a.txt")).unwrap(), "a");
    assert_eq!(names(&app.left), vec!["..", "b.txt"]);
    assert_eq!(
        app.right.focused().map(|e| e.name.as_str()),
        Some("a.txt")
    );
}

#[test]
fn test_copy_into_same_directory_is_refused() {
    let fx = Fixture::new();
    fs::write(fx.left.path().join("a.txt"), "a").unwrap();

    let mut app = fx.app();
    app.right.set_root(fx.left.path().to_path_buf()).unwrap();
    focus(&mut app, "a.txt");
    press(&mut app, KeyCode::F(5));

    let Some(DialogKind::Error { message, .. }) = &app.dialog else {
        panic!("expected error dialog, got {:?}", app.dialog);
    };
    assert!(message.contains("same directory"));
    assert!(app.pending_operation.is_none());
}

#[test]
fn test_copy_directory_into_itself_is_refused() {
    let fx = Fixture::new();
    let nested = fx.left.path().join("project").join("build");
    fs::create_dir_all(&nested).unwrap();

    let mut app = fx.app();
    app.right.set_root(nested.clone()).unwrap();
    focus(&mut app, "project");
    press(&mut app, KeyCode::F(5));

    let Some(DialogKind::Error { message, .. }) = &app.dialog else {
        panic!("expected error dialog, got {:?}", app.dialog);
    };
    assert!(message.contains("into itself"));
    assert!(!nested.join("project").exists());
}

#[test]
fn test_copy_onto_directory_holding_source_is_refused() {
    let fx = Fixture::new();
    let outer = fx.left.path().join("b");
    fs::create_dir_all(outer.join("b")).unwrap();
    fs::write(outer.join("other.txt"), "keep").unwrap();

    // 왼쪽은 base/b, 오른쪽은 base: base/b/b를 복사하면 대상 이름이 base/b
    let mut app = fx.app();
    app.left.set_root(outer.clone()).unwrap();
    app.right.set_root(fx.left.path().to_path_buf()).unwrap();
    app.settings.confirm_operations = false;
    focus(&mut app, "b");
    press(&mut app, KeyCode::F(5));

    let Some(DialogKind::Error { message, .. }) = &app.dialog else {
        panic!("expected error dialog, got {:?}", app.dialog);
    };
    assert!(message.contains("containing it"));
    assert!(app.pending_operation.is_none());
    assert!(outer.join("other.txt").exists());
    assert!(outer.join("b").is_dir());
}

#[test]
fn test_overwrite_never_deletes_directory_holding_source() {
    let fx = Fixture::new();
    let outer = fx.left.path().join("b");
    fs::create_dir_all(outer.join("b")).unwrap();
    fs::write(outer.join("other.txt"), "keep").unwrap();

    let app = fx.app();
    let mut pending = PendingOperation::transfer(
        OperationType::Move,
        vec![outer.join("b")],
        fx.left.path().to_path_buf(),
    );
    pending.conflict_policy = ConflictPolicy::OverwriteAll;

    let report = app.execute_operation(&pending);
    assert!(report.has_failures());
    assert!(report.completed.is_empty());
    assert!(outer.join("other.txt").exists());
    assert!(outer.join("b").is_dir());
}

#[cfg(unix)]
#[test]
fn test_copy_between_aliased_directories_is_refused() {
    let fx = Fixture::new();
    fs::write(fx.left.path().join("a.txt"), "a").unwrap();
    let alias = fx.right.path().join("alias");
    std::os::unix::fs::symlink(fx.left.path(), &alias).unwrap();

    let mut app = fx.app();
    app.right.set_root(alias).unwrap();
    focus(&mut app, "a.txt");
    press(&mut app, KeyCode::F(5));

    let Some(DialogKind::Error { message, .. }) = &app.dialog else {
        panic!("expected error dialog, got {:?}", app.dialog);
    };
    assert!(message.contains("same directory"));
    assert_eq!(fs::read_to_string(fx.left.path().join("a.txt")).unwrap(), "a");
}

#[test]
fn test_transfer_without_target_shows_toast() {
    let fx = Fixture::new();
    let mut app = fx.app();

    // 빈 디렉토리: 커서는 ".."
    press(&mut app, KeyCode::F(5));
    assert!(app.dialog.is_none());
    assert_eq!(app.toast_display(), Some("No files selected"));
}

#[test]
fn test_conflict_skip_existing() {
    let fx = Fixture::new();
    fs::write(fx.left.path().join("same.txt"), "new").unwrap();
    fs::write(fx.left.path().join("fresh.txt"), "fresh").unwrap();
    fs::write(fx.right.path().join("same.txt"), "old").unwrap();

    let mut app = fx.app();
    app.settings.confirm_operations = false;
    press_with(&mut app, KeyModifiers::CONTROL, KeyCode::Char('a'));
    press(&mut app, KeyCode::F(5));

    let Some(DialogKind::Conflict { names, .. }) = &app.dialog else {
        panic!("expected conflict dialog, got {:?}", app.dialog);
    };
    assert_eq!(names, &vec!["same.txt".to_string()]);

    press(&mut app, KeyCode::Char('s'));
    assert!(app.dialog.is_none());
    assert_eq!(fs::read_to_string(fx.right.path().join("same.txt")).unwrap(), "old");
    assert_eq!(fs::read_to_string(fx.right.path().join("fresh.txt")).unwrap(), "fresh");
    assert!(app.toast_display().unwrap().contains("skipped 1"));
}

#[test]
fn test_conflict_overwrite_all_replaces_directory() {
    let fx = Fixture::new();
    fs::create_dir(fx.left.path().join("data")).unwrap();
    fs::write(fx.left.path().join("data").join("new.txt"), "new").unwrap();
    fs::create_dir(fx.right.path().join("data")).unwrap();
    fs::write(fx.right.path().join("data").join("stale.txt"), "stale").unwrap();

    let mut app = fx.app();
    app.settings.confirm_operations = false;
    focus(&mut app, "data");
    press(&mut app, KeyCode::F(5));
    assert!(matches!(app.dialog, Some(DialogKind::Conflict { .. })));

    // 첫 번째 옵션 (Overwrite all)
    press(&mut app, KeyCode::Enter);
    assert!(app.dialog.is_none());
    assert!(fx.right.path().join("data").join("new.txt").exists());
    assert!(!fx.right.path().join("data").join("stale.txt").exists());
}

#[test]
fn test_conflict_cancel_leaves_destination() {
    let fx = Fixture::new();
    fs::write(fx.left.path().join("same.txt"), "new").unwrap();
    fs::write(fx.right.path().join("same.txt"), "old").unwrap();

    let mut app = fx.app();
    app.settings.confirm_operations = false;
    focus(&mut app, "same.txt");
    press(&mut app, KeyCode::F(6));

    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Enter);
    assert!(app.dialog.is_none());
    assert!(app.pending_operation.is_none());
    assert_eq!(fs::read_to_string(fx.right.path().join("same.txt")).unwrap(), "old");
    assert!(fx.left.path().join("same.txt").exists());
    assert_eq!(app.toast_display(), Some("Cancelled"));
}

#[test]
fn test_permanent_delete_after_confirmation() {
    let fx = Fixture::new();
    fs::write(fx.left.path().join("a.txt"), "a").unwrap();
    fs::create_dir(fx.left.path().join("dir")).unwrap();
    fs::write(fx.left.path().join("dir").join("x"), "x").unwrap();

    let mut app = fx.app();
    app.settings.delete_to_trash = false;
    press_with(&mut app, KeyModifiers::CONTROL, KeyCode::Char('a'));
    press(&mut app, KeyCode::F(8));

    let Some(DialogKind::Confirm { message, .. }) = &app.dialog else {
        panic!("expected confirm dialog, got {:?}", app.dialog);
    };
    assert!(message.starts_with("Permanently delete 2 items?"));

    press(&mut app, KeyCode::Char('y'));
    assert!(app.dialog.is_none());
    assert_eq!(names(&app.left), vec![".."]);
    assert!(app.left.selection().is_empty());
}

#[test]
fn test_delete_key_aliases_open_confirmation() {
    let fx = Fixture::new();
    fs::write(fx.left.path().join("a.txt"), "a").unwrap();
    let mut app = fx.app();
    focus(&mut app, "a.txt");

    for code in [KeyCode::Delete, KeyCode::Backspace] {
        press(&mut app, code);
        let Some(DialogKind::Confirm { message, .. }) = &app.dialog else {
            panic!("expected confirm dialog, got {:?}", app.dialog);
        };
        assert_eq!(message, "Move 'a.txt' to the trash?");
        press(&mut app, KeyCode::Char('n'));
        assert!(app.dialog.is_none());
    }
    assert!(fx.left.path().join("a.txt").exists());
}

#[test]
fn test_partial_failure_reports_error_dialog() {
    let fx = Fixture::new();
    fs::write(fx.left.path().join("ok.txt"), "ok").unwrap();
    fs::write(fx.left.path().join("vanish.txt"), "v").unwrap();

    let mut app = fx.app();
    app.settings.confirm_operations = false;
    press_with(&mut app, KeyModifiers::CONTROL, KeyCode::Char('a'));
    // 목록에는 남아 있지만 실제 파일은 사라진 상태
    fs::remove_file(fx.left.path().join("vanish.txt")).unwrap();
    press(&mut app, KeyCode::F(5));

    let Some(DialogKind::Error { title, message }) = &app.dialog else {
        panic!("expected error dialog, got {:?}", app.dialog);
    };
    assert_eq!(title, "Copy Errors");
    assert!(message.starts_with("Copied 1 item, failed 1"));
    assert!(message.contains("vanish.txt"));
    assert!(fx.right.path().join("ok.txt").exists());
}

// === 새 디렉토리 / 이름 변경 ===

#[test]
fn test_mkdir_creates_and_selects() {
    let fx = Fixture::new();
    fs::write(fx.left.path().join("z.txt"), "z").unwrap();
    let mut app = fx.app();

    press(&mut app, KeyCode::F(7));
    assert!(matches!(
        app.dialog,
        Some(DialogKind::Input {
            purpose: InputPurpose::MakeDirectory,
            ..
        })
    ));
    for c in "새폴더".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    press(&mut app, KeyCode::Enter);

    assert!(app.dialog.is_none());
    assert!(fx.left.path().join("새폴더").is_dir());
    assert_eq!(focused_name(&app).as_deref(), Some("새폴더"));
    let marked: Vec<String> = app.left.selected_files().into_iter().map(|e| e.name).collect();
    assert_eq!(marked, vec!["새폴더"]);
}

#[test]
fn test_mkdir_invalid_name_shows_error() {
    let fx = Fixture::new();
    let mut app = fx.app();

    app.start_mkdir();
    app.confirm_input("a/b".to_string(), InputPurpose::MakeDirectory);
    let Some(DialogKind::Error { message, .. }) = &app.dialog else {
        panic!("expected error dialog, got {:?}", app.dialog);
    };
    assert!(message.contains("path separator"));
    assert!(!fx.left.path().join("a").exists());

    app.close_dialog();
    app.confirm_input("   ".to_string(), InputPurpose::MakeDirectory);
    assert!(matches!(app.dialog, Some(DialogKind::Error { .. })));
}

#[test]
fn test_mkdir_existing_name_fails() {
    let fx = Fixture::new();
    fs::create_dir(fx.left.path().join("taken")).unwrap();
    let mut app = fx.app();

    app.confirm_input("taken".to_string(), InputPurpose::MakeDirectory);
    assert!(matches!(app.dialog, Some(DialogKind::Error { .. })));
}

#[test]
fn test_rename_reselects_new_name() {
    let fx = Fixture::new();
    fs::write(fx.left.path().join("draft.txt"), "d").unwrap();
    fs::write(fx.left.path().join("other.txt"), "o").unwrap();

    let mut app = fx.app();
    focus(&mut app, "draft.txt");
    press(&mut app, KeyCode::F(2));

    let Some(DialogKind::Input { value, .. }) = &app.dialog else {
        panic!("expected input dialog, got {:?}", app.dialog);
    };
    assert_eq!(value, "draft.txt");

    // "txt" 지우고 "md"
    for _ in 0..3 {
        press(&mut app, KeyCode::Backspace);
    }
    press(&mut app, KeyCode::Char('m'));
    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Enter);

    assert!(app.dialog.is_none());
    assert!(fx.left.path().join("draft.md").exists());
    assert!(!fx.left.path().join("draft.txt").exists());
    assert_eq!(focused_name(&app).as_deref(), Some("draft.md"));
    assert_eq!(app.toast_display(), Some("Rename completed"));
}

#[test]
fn test_rename_onto_existing_fails() {
    let fx = Fixture::new();
    fs::write(fx.left.path().join("a.txt"), "a").unwrap();
    fs::write(fx.left.path().join("b.txt"), "b").unwrap();

    let mut app = fx.app();
    focus(&mut app, "a.txt");
    app.start_rename();
    app.submit_input_dialog();
    // 같은 이름이면 아무 일 없이 닫힘
    assert!(app.dialog.is_none());

    app.confirm_input("b.txt".to_string(), InputPurpose::Rename {
        original: fx.left.path().join("a.txt"),
    });
    assert!(matches!(app.dialog, Some(DialogKind::Error { .. })));
    assert_eq!(fs::read_to_string(fx.left.path().join("b.txt")).unwrap(), "b");
}

#[test]
fn test_rename_parent_link_is_ignored() {
    let fx = Fixture::new();
    let mut app = fx.app();
    press(&mut app, KeyCode::F(2));
    assert!(app.dialog.is_none());
    assert_eq!(app.toast_display(), Some("Cannot rename '..'"));
}

#[test]
fn test_input_cancel_button() {
    let fx = Fixture::new();
    let mut app = fx.app();

    press(&mut app, KeyCode::F(7));
    press(&mut app, KeyCode::Char('x'));
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.dialog_selected_button(), Some(1));
    press(&mut app, KeyCode::Enter);
    assert!(app.dialog.is_none());
    assert!(!fx.left.path().join("x").exists());
}

// === 뷰어 / 도움말 ===

#[test]
fn test_view_file_opens_viewer() {
    let fx = Fixture::new();
    let body: String = (1..=50).map(|i| format!("line {}\n", i)).collect();
    fs::write(fx.left.path().join("notes.txt"), body).unwrap();
    fs::create_dir(fx.left.path().join("dir")).unwrap();

    let mut app = fx.app();
    focus(&mut app, "dir");
    press(&mut app, KeyCode::F(3));
    assert!(app.dialog.is_none());

    focus(&mut app, "notes.txt");
    press(&mut app, KeyCode::F(3));
    let Some(DialogKind::Viewer {
        title,
        lines,
        truncated,
        ..
    }) = &app.dialog
    else {
        panic!("expected viewer, got {:?}", app.dialog);
    };
    assert_eq!(title, "notes.txt");
    assert_eq!(lines[0], "line 1");
    assert!(!truncated);

    press(&mut app, KeyCode::End);
    let Some(DialogKind::Viewer { scroll_offset, .. }) = &app.dialog else {
        panic!("viewer closed");
    };
    assert!(*scroll_offset > 0);

    press(&mut app, KeyCode::Esc);
    assert!(app.dialog.is_none());
}

#[test]
fn test_viewer_respects_max_bytes() {
    let fx = Fixture::new();
    fs::write(fx.left.path().join("big.log"), "x".repeat(100)).unwrap();

    let mut app = fx.app();
    app.settings.viewer_max_bytes = 10;
    focus(&mut app, "big.log");
    app.view_focused_file();

    let Some(DialogKind::Viewer {
        lines, truncated, ..
    }) = &app.dialog
    else {
        panic!("expected viewer, got {:?}", app.dialog);
    };
    assert!(*truncated);
    assert_eq!(lines.concat(), "x".repeat(10));
}

#[test]
fn test_help_dialog_toggle() {
    let fx = Fixture::new();
    let mut app = fx.app();

    press(&mut app, KeyCode::F(1));
    assert!(matches!(app.dialog, Some(DialogKind::Help { scroll_offset: 0 })));
    press(&mut app, KeyCode::Down);
    assert!(matches!(app.dialog, Some(DialogKind::Help { scroll_offset: 1 })));
    // 다이얼로그가 열려 있으면 일반 키는 먹히지 않음
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.active_panel(), ActivePanel::Left);
    press(&mut app, KeyCode::F(1));
    assert!(app.dialog.is_none());
}

// === 북마크 ===

#[test]
fn test_bookmark_store_and_recall() {
    let fx = Fixture::new();
    let target = fx.left.path().join("projects");
    fs::create_dir(&target).unwrap();
    let target = target.canonicalize().unwrap();

    let mut app = fx.app();
    focus(&mut app, "projects");
    press(&mut app, KeyCode::Enter);
    press_with(
        &mut app,
        KeyModifiers::ALT | KeyModifiers::SHIFT,
        KeyCode::Char('P'),
    );
    assert_eq!(app.settings.hotkey('p'), Some(&target));
    assert_eq!(
        Settings::load_from(&fx.settings_file()).hotkey('p'),
        Some(&target)
    );

    // 다른 패널에서 불러오기
    press(&mut app, KeyCode::Tab);
    press_with(&mut app, KeyModifiers::ALT, KeyCode::Char('p'));
    assert_eq!(app.active_panel(), ActivePanel::Right);
    assert_eq!(app.active_path(), target);

    // 재시작 후에도 유지
    let mut reopened = fx.app();
    press_with(&mut reopened, KeyModifiers::ALT, KeyCode::Char('p'));
    assert_eq!(reopened.active_path(), target);
}

#[test]
fn test_bookmark_shifted_digit_stores_digit() {
    let fx = Fixture::new();
    let mut app = fx.app();

    // Shift+1 = '!'
    press_with(&mut app, KeyModifiers::ALT, KeyCode::Char('!'));
    assert_eq!(app.settings.hotkey('1'), Some(&fx.left.path().canonicalize().unwrap()));
}

#[test]
fn test_bookmark_stores_normalized_root() {
    let fx = Fixture::new();
    fs::create_dir(fx.left.path().join("projects")).unwrap();

    let mut app = fx.app();
    app.left
        .set_root(fx.left.path().join("projects").join(".."))
        .unwrap();
    press_with(
        &mut app,
        KeyModifiers::ALT | KeyModifiers::SHIFT,
        KeyCode::Char('N'),
    );
    assert_eq!(app.settings.hotkey('n'), Some(&fx.left.path().canonicalize().unwrap()));
}

#[test]
fn test_bookmark_missing_or_unknown() {
    let fx = Fixture::new();
    let gone = fx.left.path().join("gone");
    fs::create_dir(&gone).unwrap();

    let mut app = fx.app();
    press_with(&mut app, KeyModifiers::ALT, KeyCode::Char('x'));
    assert_eq!(app.toast_display(), Some("No bookmark for Alt+x"));

    app.settings.set_hotkey('g', gone.clone());
    fs::remove_dir(&gone).unwrap();
    press_with(&mut app, KeyModifiers::ALT, KeyCode::Char('g'));
    assert_eq!(app.active_path(), fx.left.path());
    assert!(app.toast_display().unwrap().contains("gone"));
}

// === 설정 / 렌더링 ===

#[test]
fn test_corrupt_settings_fall_back_to_defaults() {
    let fx = Fixture::new();
    fs::write(fx.settings_file(), "version = \"nope\"\n[[[").unwrap();

    let app = fx.app();
    assert_eq!(app.settings, Settings::default());
}

#[test]
fn test_render_dual_pane_frame() {
    let fx = Fixture::new();
    fs::write(fx.left.path().join("alpha.txt"), "a").unwrap();
    fs::create_dir(fx.right.path().join("beta")).unwrap();

    let mut app = fx.app();
    let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
    terminal
        .draw(|f| {
            app.layout.update(f.area());
            renderer::render(f, &app);
        })
        .unwrap();

    let text = buffer_text(&terminal);
    assert!(text.contains("alpha.txt"));
    assert!(text.contains("beta"));
    assert!(text.contains("Copy"));
    assert!(text.contains("Quit"));
}

#[test]
fn test_render_dialog_and_small_terminal() {
    let fx = Fixture::new();
    let mut app = fx.app();
    press(&mut app, KeyCode::F(1));

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal
        .draw(|f| {
            app.layout.update(f.area());
            renderer::render(f, &app);
        })
        .unwrap();
    assert!(buffer_text(&terminal).contains("Keyboard Shortcuts"));

    let mut tiny = Terminal::new(TestBackend::new(30, 8)).unwrap();
    tiny.draw(|f| {
        app.layout.update(f.area());
        renderer::render(f, &app);
    })
    .unwrap();
    let text = buffer_text(&tiny);
    assert!(!text.contains("Keyboard Shortcuts"));
    assert!(text.contains("Window too small"));
}
