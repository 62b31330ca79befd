use super::controllers;
use super::*;
use crate::core::actions::{find_action, find_bookmark_command};
use crossterm::event::{KeyCode, KeyModifiers};

impl App {
    /// 키 입력 처리
    ///
    /// 다이얼로그가 열려 있으면 다이얼로그가 모든 키를 받는다.
    /// 그 외에는 북마크 단축키, 액션 테이블 순으로 찾는다.
    pub fn handle_key(&mut self, modifiers: KeyModifiers, code: KeyCode) {
        if self.is_dialog_active() {
            self.handle_dialog_key(modifiers, code);
        } else if let Some(command) = find_bookmark_command(modifiers, code) {
            debug!(?command, "bookmark key");
            self.execute_bookmark(command);
        } else if let Some(action) = find_action(modifiers, code) {
            debug!(?action, ?modifiers, ?code, "key action");
            self.execute_action(action);
        }
        self.process_pane_changes();
    }

    /// 액션 실행 (단일 진입점)
    pub fn execute_action(&mut self, action: Action) {
        let page = self.layout.panel_rows();
        match action {
            Action::Quit => self.quit(),
            Action::TogglePanel => self.toggle_panel(),
            Action::MoveUp => self.active_pane_mut().move_cursor_up(),
            Action::MoveDown => self.active_pane_mut().move_cursor_down(),
            Action::PageUp => self.active_pane_mut().move_cursor_page_up(page),
            Action::PageDown => self.active_pane_mut().move_cursor_page_down(page),
            Action::GoToTop => self.active_pane_mut().move_cursor_top(),
            Action::GoToBottom => self.active_pane_mut().move_cursor_bottom(),
            Action::EnterSelected => self.enter_selected(),
            Action::ShowHelp | Action::Refresh | Action::ToggleHidden | Action::ViewFile => {
                controllers::dialog_controller::execute(self, action)
            }
            Action::OpenExternally
            | Action::Copy
            | Action::Move
            | Action::Delete
            | Action::MakeDirectory
            | Action::Rename
            | Action::ToggleSelection
            | Action::SelectAll
            | Action::DeselectAll
            | Action::InvertSelection
            | Action::SortByName
            | Action::SortByExt
            | Action::SortByDate
            | Action::SortBySize
            | Action::SortByType => controllers::operation_controller::execute(self, action),
        }
    }

    /// Enter: 디렉토리는 진입, ".."는 상위로, 파일은 OS 기본 프로그램으로
    pub fn enter_selected(&mut self) {
        let Some(entry) = self.active_pane().focused().cloned() else {
            return;
        };

        if entry.is_parent_link() {
            self.go_to_parent();
        } else if entry.is_directory() {
            self.change_active_dir(entry.path, None);
        } else {
            self.open_externally(&entry.path);
        }
    }

    /// 상위 디렉토리로 이동 후 떠나온 디렉토리에 커서
    pub fn go_to_parent(&mut self) {
        let Some(parent) = self.active_pane().parent_root() else {
            return;
        };
        let came_from = self
            .active_path()
            .file_name()
            .map(|n| n.to_string_lossy().to_string());
        self.change_active_dir(parent, came_from.as_deref());
    }

    /// 활성 패널 루트 변경
    ///
    /// 실패하면 패널은 그대로 두고 에러 다이얼로그를 띄운다.
    pub(super) fn change_active_dir(&mut self, path: PathBuf, focus_name: Option<&str>) -> bool {
        match self.active_pane_mut().set_root(path.clone()) {
            Ok(()) => {
                if let Some(name) = focus_name {
                    self.active_pane_mut().focus_name(name);
                }
                true
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot open directory");
                self.dialog = Some(DialogKind::error(
                    "Error",
                    Self::format_user_error(
                        "Open directory",
                        Some(&path),
                        &e.to_string(),
                        "Check that the directory exists and is readable.",
                    ),
                ));
                false
            }
        }
    }

    /// 활성 패널 새로고침 (Ctrl+R)
    pub fn refresh_current(&mut self) {
        if let Err(e) = self.active_pane_mut().refresh() {
            warn!(error = %e, "refresh failed");
            self.set_toast(&format!("Refresh failed: {}", e));
        }
    }

    /// 두 패널 새로고침 (파일 작업 후)
    pub fn refresh_both_panels(&mut self) {
        for panel in [ActivePanel::Left, ActivePanel::Right] {
            if let Err(e) = self.pane_mut(panel).refresh() {
                warn!(pane = ?panel, error = %e, "refresh failed");
            }
        }
    }

    /// 활성 패널 정렬 (같은 기준이면 방향 전환)
    ///
    /// 마지막 정렬 상태는 설정에 저장되어 다음 실행의 기본값이 된다.
    pub(super) fn sort_active_panel(&mut self, key: SortKey) {
        let sort = self.active_pane().sort().toggled(key);
        self.apply_sort(sort);
    }

    pub(super) fn apply_sort(&mut self, sort: SortDescriptor) {
        self.active_pane_mut().set_sort_descriptor(sort);
        self.settings.set_sort_descriptor(sort);
        self.save_settings();
        self.set_toast(&format!("Sort: {}", sort.indicator()));
    }

    /// 숨김 파일 표시 전환 (두 패널 모두)
    pub fn toggle_hidden(&mut self) {
        let show = !self.settings.show_hidden;
        self.settings.show_hidden = show;
        for panel in [ActivePanel::Left, ActivePanel::Right] {
            if let Err(e) = self.pane_mut(panel).set_show_hidden(show) {
                warn!(pane = ?panel, error = %e, "rescan after hidden toggle failed");
            }
        }
        self.save_settings();
        self.set_toast(if show {
            "Hidden files shown"
        } else {
            "Hidden files hidden"
        });
    }

    /// 도움말 다이얼로그
    pub fn show_help(&mut self) {
        self.dialog = Some(DialogKind::help());
    }

    /// 사용자용 에러 메시지 (작업, 경로, 이유, 힌트)
    pub(super) fn format_user_error(
        action: &str,
        path: Option<&Path>,
        error: &str,
        hint: &str,
    ) -> String {
        let mut message = format!("{} failed.", action);
        if let Some(p) = path {
            message.push_str(&format!("\nPath: {}", p.display()));
        }
        message.push_str(&format!("\nReason: {}", error));
        if !hint.is_empty() {
            message.push_str(&format!("\nHint: {}", hint));
        }
        message
    }

    /// 토스트 메시지 설정
    pub fn set_toast(&mut self, message: &str) {
        self.toast_message = Some((message.to_string(), Instant::now()));
    }

    /// 만료된 토스트 제거
    pub fn clear_expired_toast(&mut self) {
        if let Some((_, time)) = &self.toast_message {
            if time.elapsed().as_secs() >= 3 {
                self.toast_message = None;
            }
        }
    }

    /// 토스트 메시지 (만료 안 된 경우만)
    pub fn toast_display(&self) -> Option<&str> {
        self.toast_message.as_ref().and_then(|(msg, time)| {
            if time.elapsed().as_secs() < 3 {
                Some(msg.as_str())
            } else {
                None
            }
        })
    }
}
