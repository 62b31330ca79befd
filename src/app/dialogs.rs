use super::text_edit::LineEdit;
use super::*;
use crate::core::actions::generate_help_entries;
use crate::ui::components::dialog::{viewer_page_rows, CONFLICT_OPTIONS};
use crossterm::event::{KeyCode, KeyModifiers};

impl App {
    /// 다이얼로그 키 처리 (종류별 분기)
    pub(super) fn handle_dialog_key(&mut self, modifiers: KeyModifiers, code: KeyCode) {
        match self.dialog {
            Some(DialogKind::Input { .. }) => self.handle_input_key(modifiers, code),
            Some(DialogKind::Confirm { .. }) => self.handle_confirm_key(modifiers, code),
            Some(DialogKind::Conflict { .. }) => self.handle_conflict_key(modifiers, code),
            Some(DialogKind::Error { .. }) => {
                if matches!(code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                    self.close_dialog();
                }
            }
            Some(DialogKind::Viewer { .. }) => self.handle_viewer_key(code),
            Some(DialogKind::Help { .. }) => self.handle_help_key(code),
            None => {}
        }
    }

    // === 입력 다이얼로그 ===

    fn handle_input_key(&mut self, modifiers: KeyModifiers, code: KeyCode) {
        match (modifiers, code) {
            (_, KeyCode::Enter) => {
                if self.dialog_selected_button() == Some(0) {
                    self.submit_input_dialog();
                } else {
                    self.close_dialog();
                }
            }
            (_, KeyCode::Esc) => self.close_dialog(),
            (_, KeyCode::Tab) | (_, KeyCode::BackTab) => self.dialog_toggle_button(),
            (KeyModifiers::CONTROL, KeyCode::Char('w')) => {
                self.edit_input(LineEdit::delete_prev_word)
            }
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                self.edit_input(|value, cursor| LineEdit::insert_char(value, cursor, c))
            }
            (_, KeyCode::Backspace) => self.edit_input(LineEdit::backspace),
            (_, KeyCode::Delete) => self.edit_input(LineEdit::delete),
            (_, KeyCode::Left) => self.edit_input(|value, cursor| LineEdit::left(value, cursor)),
            (_, KeyCode::Right) => self.edit_input(|value, cursor| LineEdit::right(value, cursor)),
            (_, KeyCode::Home) => self.edit_input(|_, cursor| LineEdit::home(cursor)),
            (_, KeyCode::End) => self.edit_input(|value, cursor| LineEdit::end(value, cursor)),
            _ => {}
        }
    }

    /// 입력 다이얼로그 값/커서 편집
    fn edit_input(&mut self, edit: impl FnOnce(&mut String, &mut usize)) {
        if let Some(DialogKind::Input {
            value, cursor_pos, ..
        }) = &mut self.dialog
        {
            edit(value, cursor_pos);
        }
    }

    /// 입력값 확정 (OK)
    pub fn submit_input_dialog(&mut self) {
        if let Some(DialogKind::Input { value, purpose, .. }) = &self.dialog {
            let (value, purpose) = (value.clone(), purpose.clone());
            self.confirm_input(value, purpose);
        }
    }

    // === 확인 다이얼로그 ===

    fn handle_confirm_key(&mut self, modifiers: KeyModifiers, code: KeyCode) {
        match (modifiers, code) {
            (_, KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right) => {
                self.dialog_toggle_button()
            }
            (_, KeyCode::Enter) => {
                if self.dialog_selected_button() == Some(0) {
                    self.accept_confirmation();
                } else {
                    self.close_dialog();
                }
            }
            (_, KeyCode::Char('y') | KeyCode::Char('Y')) => self.accept_confirmation(),
            (_, KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N')) => self.close_dialog(),
            _ => {}
        }
    }

    /// OK/Cancel 버튼 전환 (입력/확인 다이얼로그)
    pub fn dialog_toggle_button(&mut self) {
        if let Some(
            DialogKind::Input {
                selected_button, ..
            }
            | DialogKind::Confirm {
                selected_button, ..
            },
        ) = &mut self.dialog
        {
            *selected_button = 1 - (*selected_button).min(1);
        }
    }

    pub fn dialog_selected_button(&self) -> Option<usize> {
        match &self.dialog {
            Some(DialogKind::Input {
                selected_button, ..
            })
            | Some(DialogKind::Confirm {
                selected_button, ..
            }) => Some(*selected_button),
            _ => None,
        }
    }

    // === 충돌 다이얼로그 ===

    fn handle_conflict_key(&mut self, modifiers: KeyModifiers, code: KeyCode) {
        match (modifiers, code) {
            (KeyModifiers::NONE, KeyCode::Tab) | (_, KeyCode::Right) => self.dialog_conflict_step(1),
            (_, KeyCode::BackTab) | (_, KeyCode::Left) => {
                self.dialog_conflict_step(CONFLICT_OPTIONS.len() - 1)
            }
            (_, KeyCode::Enter) => {
                if let Some(DialogKind::Conflict {
                    selected_option, ..
                }) = &self.dialog
                {
                    let option = *selected_option;
                    self.resolve_conflict(option);
                }
            }
            (_, KeyCode::Char('o') | KeyCode::Char('O')) => self.resolve_conflict(0),
            (_, KeyCode::Char('s') | KeyCode::Char('S')) => self.resolve_conflict(1),
            (_, KeyCode::Esc) => self.resolve_conflict(2),
            _ => {}
        }
    }

    fn dialog_conflict_step(&mut self, step: usize) {
        if let Some(DialogKind::Conflict {
            selected_option, ..
        }) = &mut self.dialog
        {
            *selected_option = (*selected_option + step) % CONFLICT_OPTIONS.len();
        }
    }

    // === 뷰어 / 도움말 ===

    fn handle_viewer_key(&mut self, code: KeyCode) {
        let (_, height) = self.layout.terminal_size();
        let page = viewer_page_rows(height);

        let Some(DialogKind::Viewer {
            lines,
            scroll_offset,
            ..
        }) = &mut self.dialog
        else {
            return;
        };
        let max_scroll = lines.len().saturating_sub(page);

        match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::F(3) | KeyCode::Char('q') => {
                self.dialog = None;
            }
            KeyCode::Up | KeyCode::Char('k') => *scroll_offset = scroll_offset.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                *scroll_offset = (*scroll_offset + 1).min(max_scroll)
            }
            KeyCode::PageUp => *scroll_offset = scroll_offset.saturating_sub(page),
            KeyCode::PageDown | KeyCode::Char(' ') => {
                *scroll_offset = (*scroll_offset + page).min(max_scroll)
            }
            KeyCode::Home => *scroll_offset = 0,
            KeyCode::End => *scroll_offset = max_scroll,
            _ => {}
        }
    }

    fn handle_help_key(&mut self, code: KeyCode) {
        // 헤더 + 항목 + 빈 줄
        let total_rows: usize = generate_help_entries()
            .iter()
            .map(|(_, items)| items.len() + 2)
            .sum();

        let Some(DialogKind::Help { scroll_offset }) = &mut self.dialog else {
            return;
        };
        match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::F(1) | KeyCode::Char('q') => {
                self.dialog = None;
            }
            KeyCode::Up | KeyCode::Char('k') => *scroll_offset = scroll_offset.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                *scroll_offset = (*scroll_offset + 1).min(total_rows.saturating_sub(1))
            }
            KeyCode::Home => *scroll_offset = 0,
            _ => {}
        }
    }
}
