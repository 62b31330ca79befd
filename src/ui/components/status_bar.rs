// Status bar component - 상태바 컴포넌트
//
// 활성 패널 경로, 파일/디렉토리 개수, 마킹 정보, 토스트 메시지 표시

use crate::ui::Theme;
use crate::utils::path_display::truncate_path;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// 상태바 컴포넌트
pub struct StatusBar<'a> {
    /// 활성 패널 루트
    root: &'a Path,
    file_count: usize,
    dir_count: usize,
    selected_count: usize,
    /// 마킹된 항목 총 크기 (포맷된 문자열)
    selected_size: &'a str,
    /// 토스트 메시지 (있으면 경로 대신 표시)
    message: Option<&'a str>,
    bg_color: Color,
    fg_color: Color,
    accent_color: Color,
}

impl Default for StatusBar<'_> {
    fn default() -> Self {
        let theme = Theme::dark();
        Self {
            root: Path::new(""),
            file_count: 0,
            dir_count: 0,
            selected_count: 0,
            selected_size: "0 B",
            message: None,
            bg_color: theme.status_bar_bg,
            fg_color: theme.status_bar_fg,
            accent_color: theme.file_marked,
        }
    }
}

impl<'a> StatusBar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(mut self, root: &'a Path) -> Self {
        self.root = root;
        self
    }

    pub fn file_count(mut self, count: usize) -> Self {
        self.file_count = count;
        self
    }

    pub fn dir_count(mut self, count: usize) -> Self {
        self.dir_count = count;
        self
    }

    pub fn selected_count(mut self, count: usize) -> Self {
        self.selected_count = count;
        self
    }

    pub fn selected_size(mut self, size: &'a str) -> Self {
        self.selected_size = size;
        self
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.status_bar_bg;
        self.fg_color = theme.status_bar_fg;
        self.accent_color = theme.file_marked;
        self
    }

    fn right_info(&self) -> String {
        let mut info = format!("{} files, {} dirs", self.file_count, self.dir_count);
        if self.selected_count > 0 {
            info.push_str(&format!(
                " | {} marked ({})",
                self.selected_count, self.selected_size
            ));
        }
        info.push(' ');
        info
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let right = self.right_info();
        let left_width = (area.width as usize).saturating_sub(right.width() + 2);

        let left = match self.message {
            Some(message) => Span::styled(
                format!(" {}", message),
                Style::default()
                    .fg(self.accent_color)
                    .add_modifier(Modifier::BOLD),
            ),
            None => Span::styled(
                format!(" {}", truncate_path(self.root, left_width)),
                Style::default().fg(self.fg_color),
            ),
        };

        let padding = (area.width as usize).saturating_sub(left.content.width() + right.width());
        let line = Line::from(vec![
            left,
            Span::raw(" ".repeat(padding)),
            Span::styled(right, Style::default().fg(self.fg_color)),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_text(bar: StatusBar<'_>, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
        (0..width)
            .map(|x| {
                buf.cell((x, 0))
                    .map(|cell| cell.symbol().to_string())
                    .unwrap_or_default()
            })
            .collect()
    }

    #[test]
    fn test_status_bar_shows_root_and_counts() {
        let root = Path::new("/srv/data");
        let text = render_text(StatusBar::new().root(root).file_count(10).dir_count(5), 80);

        assert!(text.contains("/srv/data"));
        assert!(text.contains("10 files, 5 dirs"));
        assert!(!text.contains("marked"));
    }

    #[test]
    fn test_status_bar_selection_and_message() {
        let root = Path::new("/srv/data");
        let text = render_text(
            StatusBar::new()
                .root(root)
                .selected_count(2)
                .selected_size("3.0 KB")
                .message(Some("Copied 2 items")),
            80,
        );

        assert!(text.contains("Copied 2 items"));
        assert!(!text.contains("/srv/data"));
        assert!(text.contains("2 marked (3.0 KB)"));
    }
}
