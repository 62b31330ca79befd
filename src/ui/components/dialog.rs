//! 다이얼로그 위젯
//!
//! 입력(새 디렉토리, 이름 변경), 작업 확인, 이름 충돌, 오류/메시지, 파일 뷰어, 도움말.

use crate::core::actions::generate_help_entries;
use crate::ui::Theme;
use crate::utils::path_display::truncate_name;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use std::path::PathBuf;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 다이얼로그 내부 좌우 패딩 (border 안쪽 여백)
const DIALOG_H_PADDING: u16 = 2;
/// 다이얼로그 내부 상단 패딩 (border 아래 여백)
const DIALOG_V_PADDING: u16 = 1;

/// 충돌 다이얼로그 선택지 (selected_option 순서)
pub const CONFLICT_OPTIONS: [&str; 3] = ["Overwrite all", "Skip existing", "Cancel"];

/// 충돌 다이얼로그에 나열하는 최대 이름 수
const CONFLICT_LIST_MAX: usize = 6;

/// 입력 다이얼로그 용도
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputPurpose {
    MakeDirectory,
    Rename { original: PathBuf },
}

/// 다이얼로그 종류
#[derive(Debug, Clone, PartialEq)]
pub enum DialogKind {
    /// 이름 입력
    Input {
        title: String,
        prompt: String,
        value: String,
        /// 바이트 인덱스
        cursor_pos: usize,
        selected_button: usize, // 0: OK, 1: Cancel
        purpose: InputPurpose,
    },
    /// 작업 확인 (대기 작업은 App이 들고 있다)
    Confirm {
        title: String,
        message: String,
        selected_button: usize, // 0: OK, 1: Cancel
    },
    /// 대상에 이미 같은 이름이 있음
    Conflict {
        names: Vec<String>,
        selected_option: usize, // CONFLICT_OPTIONS 인덱스
    },
    Error {
        title: String,
        message: String,
    },
    /// 읽기 전용 텍스트 뷰어
    Viewer {
        title: String,
        lines: Vec<String>,
        scroll_offset: usize,
        truncated: bool,
    },
    Help {
        scroll_offset: usize,
    },
}

impl DialogKind {
    /// 새 디렉토리 이름 입력
    pub fn mkdir_input() -> Self {
        DialogKind::Input {
            title: "Create New Directory".to_string(),
            prompt: "Directory name:".to_string(),
            value: String::new(),
            cursor_pos: 0,
            selected_button: 0,
            purpose: InputPurpose::MakeDirectory,
        }
    }

    /// 이름 변경 입력 (현재 이름으로 채움, 커서는 끝)
    pub fn rename_input(original: PathBuf, current_name: impl Into<String>) -> Self {
        let value: String = current_name.into();
        let cursor_pos = value.len();
        DialogKind::Input {
            title: "Rename".to_string(),
            prompt: "New name:".to_string(),
            value,
            cursor_pos,
            selected_button: 0,
            purpose: InputPurpose::Rename { original },
        }
    }

    pub fn confirm(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Confirm {
            title: title.into(),
            message: message.into(),
            selected_button: 0,
        }
    }

    pub fn conflict(names: Vec<String>) -> Self {
        DialogKind::Conflict {
            names,
            selected_option: 0,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Error {
            title: title.into(),
            message: message.into(),
        }
    }

    /// 파일 뷰어 (탭은 공백 4칸, 제어 문자는 표시용으로 치환)
    pub fn viewer(title: impl Into<String>, text: &str, truncated: bool) -> Self {
        let lines = text
            .lines()
            .map(|line| {
                line.chars()
                    .flat_map(|c| match c {
                        '\t' => vec![' '; 4],
                        c if c.is_control() => vec!['·'],
                        c => vec![c],
                    })
                    .collect()
            })
            .collect();
        DialogKind::Viewer {
            title: title.into(),
            lines,
            scroll_offset: 0,
            truncated,
        }
    }

    pub fn help() -> Self {
        DialogKind::Help { scroll_offset: 0 }
    }
}

/// 뷰어 한 화면에 보이는 줄 수 (테두리 2 + 하단 힌트 1)
pub fn viewer_page_rows(screen_height: u16) -> usize {
    viewer_height(screen_height).saturating_sub(3).max(1) as usize
}

fn viewer_height(screen_height: u16) -> u16 {
    screen_height.saturating_sub(2).max(5)
}

/// 다이얼로그 위젯
pub struct Dialog<'a> {
    kind: &'a DialogKind,
    bg_color: Color,
    fg_color: Color,
    border_color: Color,
    title_color: Color,
    muted_color: Color,
    error_color: Color,
    button_bg: Color,
    button_selected_bg: Color,
    button_selected_fg: Color,
    input_bg: Color,
}

impl<'a> Dialog<'a> {
    pub fn new(kind: &'a DialogKind) -> Self {
        Self::with_theme(kind, &Theme::dark())
    }

    fn with_theme(kind: &'a DialogKind, theme: &Theme) -> Self {
        Self {
            kind,
            bg_color: theme.dialog_bg,
            fg_color: theme.fg_primary,
            border_color: theme.dialog_border,
            title_color: theme.accent,
            muted_color: theme.meta,
            error_color: theme.error,
            button_bg: theme.panel_inactive_border,
            button_selected_bg: theme.button_focus_bg,
            button_selected_fg: theme.file_cursor,
            input_bg: theme.bg_primary,
        }
    }

    /// 테마 적용
    pub fn theme(self, theme: &Theme) -> Self {
        Self::with_theme(self.kind, theme)
    }

    /// 다이얼로그 영역 계산 (화면 중앙)
    fn calculate_area(&self, screen: Rect) -> Rect {
        let sw = screen.width;
        let sh = screen.height;

        let (width, height) = match self.kind {
            DialogKind::Input { .. } => (50u16.min(sw.saturating_sub(4)).max(30), 7u16),
            DialogKind::Confirm { message, .. } => {
                let w = 50u16.min(sw.saturating_sub(4)).max(30);
                (w, 5 + wrapped_rows(message, w))
            }
            DialogKind::Conflict { names, .. } => {
                let listed = names.len().min(CONFLICT_LIST_MAX) as u16;
                let more = u16::from(names.len() > CONFLICT_LIST_MAX);
                (50u16.min(sw.saturating_sub(4)).max(36), 7 + listed + more)
            }
            DialogKind::Error { message, .. } => {
                let w = 60u16.min(sw.saturating_sub(4)).max(30);
                (w, 5 + wrapped_rows(message, w))
            }
            DialogKind::Viewer { .. } => (sw.saturating_sub(4), viewer_height(sh)),
            DialogKind::Help { .. } => {
                let w = 60u16.min(sw.saturating_sub(4)).max(40);
                (w, sh.saturating_sub(6).max(15))
            }
        };

        let width = width.min(sw.saturating_sub(2)).max(1);
        let height = height.min(sh).max(1);

        Rect {
            x: screen.x + sw.saturating_sub(width) / 2,
            y: screen.y + sh.saturating_sub(height) / 2,
            width,
            height,
        }
    }

    fn frame(&self, buf: &mut Buffer, area: Rect, title: &str, accent: Color) {
        Block::default()
            .title(format!(" {} ", title))
            .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(self.bg_color))
            .render(area, buf);
    }

    fn inner(area: Rect) -> Rect {
        Rect {
            x: area.x + DIALOG_H_PADDING,
            y: area.y + DIALOG_V_PADDING,
            width: area.width.saturating_sub(DIALOG_H_PADDING * 2),
            height: area.height.saturating_sub(DIALOG_V_PADDING * 2),
        }
    }

    /// 버튼 하나 그리고 너비 반환
    fn render_button(&self, buf: &mut Buffer, x: u16, y: u16, label: &str, selected: bool) -> u16 {
        let (bg, fg) = if selected {
            (self.button_selected_bg, self.button_selected_fg)
        } else {
            (self.button_bg, self.fg_color)
        };

        let padded = format!(" {} ", label);
        let width = padded.width() as u16;
        buf.set_string(x, y, &padded, Style::default().fg(fg).bg(bg));

        // wide character continuation cell 배경 보정
        for i in 0..width {
            if let Some(cell) = buf.cell_mut((x + i, y)) {
                cell.set_bg(bg);
            }
        }
        width
    }

    /// 하단 중앙 버튼 행
    fn render_button_row(&self, buf: &mut Buffer, area: Rect, labels: &[&str], selected: usize) {
        let total: u16 = labels
            .iter()
            .map(|l| l.width() as u16 + 2)
            .sum::<u16>()
            + 2 * labels.len().saturating_sub(1) as u16;
        let y = area.y + area.height.saturating_sub(2);
        let mut x = area.x + area.width.saturating_sub(total) / 2;
        for (i, label) in labels.iter().enumerate() {
            x += self.render_button(buf, x, y, label, i == selected) + 2;
        }
    }

    fn render_input(&self, buf: &mut Buffer, area: Rect, title: &str, prompt: &str, value: &str, cursor_pos: usize, selected_button: usize) {
        self.frame(buf, area, title, self.border_color);
        let inner = Self::inner(area);

        buf.set_string(inner.x, inner.y, prompt, Style::default().fg(self.fg_color));

        // 입력 필드 배경
        let input_y = inner.y + 1;
        for x in inner.x..inner.x + inner.width {
            if let Some(cell) = buf.cell_mut((x, input_y)) {
                cell.set_bg(self.input_bg);
            }
        }

        let max_display = (inner.width as usize).saturating_sub(2).max(1);
        let (shown, cursor_col) = visible_input(value, cursor_pos, max_display);
        let value_style = Style::default().fg(self.fg_color).bg(self.input_bg);
        buf.set_string(inner.x + 1, input_y, shown, value_style);

        // 커서: 글자 위에서는 반전, 끝에서는 막대
        let cursor_x = inner.x + 1 + cursor_col as u16;
        if cursor_x < inner.x + inner.width {
            if let Some(cell) = buf.cell_mut((cursor_x, input_y)) {
                if cursor_pos < value.len() {
                    cell.set_style(Style::default().fg(self.input_bg).bg(self.fg_color));
                } else {
                    cell.set_char('▏');
                    cell.set_style(value_style);
                }
            }
        }

        let button_y = inner.y + 3;
        let ok_width = self.render_button(buf, inner.x, button_y, "OK", selected_button == 0);
        self.render_button(buf, inner.x + ok_width + 2, button_y, "Cancel", selected_button == 1);
    }

    fn render_confirm(&self, buf: &mut Buffer, area: Rect, title: &str, message: &str, selected_button: usize) {
        self.frame(buf, area, title, self.border_color);
        let inner = Self::inner(area);

        let msg_area = Rect {
            height: inner.height.saturating_sub(2),
            ..inner
        };
        Paragraph::new(message)
            .style(Style::default().fg(self.fg_color))
            .wrap(Wrap { trim: true })
            .render(msg_area, buf);

        self.render_button_row(buf, area, &["OK", "Cancel"], selected_button);
    }

    fn render_conflict(&self, buf: &mut Buffer, area: Rect, names: &[String], selected_option: usize) {
        self.frame(buf, area, "File Exists", self.border_color);
        let inner = Self::inner(area);
        let text_style = Style::default().fg(self.fg_color);

        let header = if names.len() == 1 {
            "This item already exists in the destination:".to_string()
        } else {
            format!("{} items already exist in the destination:", names.len())
        };
        buf.set_stringn(inner.x, inner.y, &header, inner.width as usize, text_style);

        let name_width = (inner.width as usize).saturating_sub(2);
        // 버튼 행 위까지만
        let list_end = area.y + area.height.saturating_sub(3);
        let mut y = inner.y + 1;
        for name in names.iter().take(CONFLICT_LIST_MAX) {
            if y >= list_end {
                break;
            }
            let shown = truncate_name(name, name_width);
            buf.set_string(inner.x + 2, y, shown, Style::default().fg(self.title_color));
            y += 1;
        }
        if names.len() > CONFLICT_LIST_MAX && y < list_end {
            let more = format!("... and {} more", names.len() - CONFLICT_LIST_MAX);
            buf.set_string(inner.x + 2, y, more, Style::default().fg(self.muted_color));
        }

        self.render_button_row(buf, area, &CONFLICT_OPTIONS, selected_option);
    }

    fn render_error(&self, buf: &mut Buffer, area: Rect, title: &str, message: &str) {
        self.frame(buf, area, title, self.error_color);
        let inner = Self::inner(area);

        let msg_area = Rect {
            height: inner.height.saturating_sub(2),
            ..inner
        };
        Paragraph::new(message)
            .style(Style::default().fg(self.fg_color))
            .wrap(Wrap { trim: false })
            .render(msg_area, buf);

        self.render_button_row(buf, area, &["OK"], 0);
    }

    fn render_viewer(&self, buf: &mut Buffer, area: Rect, title: &str, lines: &[String], scroll_offset: usize, truncated: bool) {
        self.frame(buf, area, title, self.border_color);

        let text_area = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(3),
        };
        let visible = text_area.height as usize;
        let max_scroll = lines.len().saturating_sub(visible);
        let scroll = scroll_offset.min(max_scroll);

        let text_style = Style::default().fg(self.fg_color);
        for (i, line) in lines.iter().skip(scroll).take(visible).enumerate() {
            buf.set_stringn(text_area.x, text_area.y + i as u16, line, text_area.width as usize, text_style);
        }

        let position = if lines.is_empty() {
            "(empty)".to_string()
        } else {
            format!(
                "{}-{}/{}",
                scroll + 1,
                (scroll + visible).min(lines.len()),
                lines.len()
            )
        };
        let hint = if truncated {
            format!("Esc:Close  ↑↓ PgUp/PgDn:Scroll  {}  [truncated]", position)
        } else {
            format!("Esc:Close  ↑↓ PgUp/PgDn:Scroll  {}", position)
        };
        let hint_y = area.y + area.height.saturating_sub(2);
        let hint_x = area.x + area.width.saturating_sub(hint.width() as u16) / 2;
        buf.set_stringn(hint_x, hint_y, &hint, text_area.width as usize, Style::default().fg(self.muted_color));
    }

    fn render_help(&self, buf: &mut Buffer, area: Rect, scroll_offset: usize) {
        self.frame(buf, area, "Keyboard Shortcuts", self.border_color);

        let inner = Rect {
            height: area.height.saturating_sub(3),
            ..Self::inner(area)
        };

        let header_style = Style::default()
            .fg(self.title_color)
            .add_modifier(Modifier::BOLD);
        let key_style = Style::default().fg(self.title_color);
        let desc_style = Style::default().fg(self.fg_color);

        // (헤더 여부, 키, 설명)
        let mut rows: Vec<(bool, &str, &str)> = Vec::new();
        let sections = generate_help_entries();
        for (category, items) in &sections {
            rows.push((true, category, ""));
            rows.extend(items.iter().map(|(key, desc)| (false, *key, *desc)));
            rows.push((false, "", ""));
        }

        let visible = inner.height as usize;
        let scroll = scroll_offset.min(rows.len().saturating_sub(visible));
        let key_col_width = 18u16;

        for (i, (is_header, key, desc)) in rows.iter().skip(scroll).take(visible).enumerate() {
            let y = inner.y + i as u16;
            if *is_header {
                buf.set_string(inner.x, y, *key, header_style);
            } else if !key.is_empty() {
                buf.set_string(inner.x + 2, y, *key, key_style);
                buf.set_string(inner.x + key_col_width, y, *desc, desc_style);
            }
        }

        let hint = "Esc/F1:Close  ↑↓:Scroll";
        let hint_x = area.x + area.width.saturating_sub(hint.width() as u16) / 2;
        buf.set_string(hint_x, area.y + area.height.saturating_sub(2), hint, Style::default().fg(self.muted_color));
    }
}

/// 폭 `dialog_width`인 다이얼로그 안에서 메시지가 차지하는 줄 수 (대략)
fn wrapped_rows(message: &str, dialog_width: u16) -> u16 {
    let text_width = dialog_width.saturating_sub(DIALOG_H_PADDING * 2).max(1) as usize;
    let rows: usize = message
        .lines()
        .map(|line| line.width().max(1).div_ceil(text_width))
        .sum();
    rows.max(1) as u16
}

/// 입력값 중 화면에 보일 부분과 그 안의 커서 열
///
/// 커서가 필드 밖으로 나가면 커서가 오른쪽 끝에 오도록 앞부분을 자른다.
fn visible_input(value: &str, cursor_pos: usize, max_display: usize) -> (&str, usize) {
    let cursor_pos = cursor_pos.min(value.len());
    let cursor_col: usize = value[..cursor_pos]
        .chars()
        .map(|c| c.width().unwrap_or(0))
        .sum();
    if cursor_col < max_display {
        return (value, cursor_col);
    }

    let skip_width = cursor_col + 1 - max_display;
    let mut skipped = 0;
    for (i, c) in value.char_indices() {
        if skipped >= skip_width {
            return (&value[i..], cursor_col - skipped);
        }
        skipped += c.width().unwrap_or(0);
    }
    ("", 0)
}

impl Widget for Dialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_area = self.calculate_area(area);
        Clear.render(dialog_area, buf);

        match self.kind {
            DialogKind::Input {
                title,
                prompt,
                value,
                cursor_pos,
                selected_button,
                ..
            } => self.render_input(buf, dialog_area, title, prompt, value, *cursor_pos, *selected_button),
            DialogKind::Confirm {
                title,
                message,
                selected_button,
            } => self.render_confirm(buf, dialog_area, title, message, *selected_button),
            DialogKind::Conflict {
                names,
                selected_option,
            } => self.render_conflict(buf, dialog_area, names, *selected_option),
            DialogKind::Error { title, message } => {
                self.render_error(buf, dialog_area, title, message)
            }
            DialogKind::Viewer {
                title,
                lines,
                scroll_offset,
                truncated,
            } => self.render_viewer(buf, dialog_area, title, lines, *scroll_offset, *truncated),
            DialogKind::Help { scroll_offset } => {
                self.render_help(buf, dialog_area, *scroll_offset)
            }
        }
    }
}
