// Warning screen component - 경고 화면 컴포넌트
//
// 터미널이 너무 작을 때 패널 대신 표시

use crate::ui::layout::{DUAL_PANEL_MIN_WIDTH, MIN_HEIGHT, MIN_WIDTH};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// 경고 화면 컴포넌트
pub struct WarningScreen {
    /// 현재 터미널 크기
    current_size: (u16, u16),
    theme: Theme,
}

impl Default for WarningScreen {
    fn default() -> Self {
        Self {
            current_size: (0, 0),
            theme: Theme::dark(),
        }
    }
}

impl WarningScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_size(mut self, width: u16, height: u16) -> Self {
        self.current_size = (width, height);
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.theme = theme.clone();
        self
    }
}

impl WarningScreen {
    fn message_lines(&self) -> Vec<Line<'static>> {
        let strong = Style::default()
            .fg(self.theme.warning)
            .add_modifier(Modifier::BOLD);
        let normal = Style::default().fg(self.theme.fg_primary);
        let dim = Style::default().fg(self.theme.meta);
        let (width, height) = self.current_size;

        vec![
            Line::from(Span::styled("Window too small", strong)),
            Line::from(vec![
                Span::styled(format!("{}x{}", width, height), Style::default().fg(self.theme.error)),
                Span::styled(format!(" < {}x{}", MIN_WIDTH, MIN_HEIGHT), normal),
            ]),
            Line::from(Span::styled(
                format!("Dual pane from {} columns", DUAL_PANEL_MIN_WIDTH),
                dim,
            )),
            Line::from(Span::styled("F10 quits", dim)),
        ]
    }
}

impl Widget for WarningScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.theme.bg_primary));

        // 화면이 아무리 작아도 위에서부터 들어가는 만큼만, 가로 가운데 정렬
        let lines = self.message_lines();
        let top = area.y + area.height.saturating_sub(lines.len() as u16) / 2;
        for (i, line) in lines.iter().enumerate() {
            let y = top + i as u16;
            if y >= area.bottom() {
                break;
            }
            let width = line.width() as u16;
            let x = area.x + area.width.saturating_sub(width) / 2;
            buf.set_line(x, y, line, area.width);
        }
    }
}
