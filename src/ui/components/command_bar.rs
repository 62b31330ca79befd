// Command bar component - 하단 커맨드 바 컴포넌트
//
// F키 단축키 표시 (항목은 액션 레지스트리에서 생성)

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// 커맨드 항목
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandItem {
    /// 단축키 (F1, F2, ...)
    pub key: String,
    /// 레이블 (Help, Copy, ...)
    pub label: String,
}

impl CommandItem {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// 커맨드 바 컴포넌트
pub struct CommandBar {
    commands: Vec<CommandItem>,
    bg_color: Color,
    key_color: Color,
    label_color: Color,
}

impl Default for CommandBar {
    fn default() -> Self {
        let theme = Theme::dark();
        Self {
            commands: Vec::new(),
            bg_color: theme.command_bar_bg,
            key_color: theme.command_key,
            label_color: theme.command_label,
        }
    }
}

impl CommandBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(mut self, commands: Vec<CommandItem>) -> Self {
        self.commands = commands;
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.command_bar_bg;
        self.key_color = theme.command_key;
        self.label_color = theme.command_label;
        self
    }
}

impl CommandBar {
    /// 좁은 화면에서는 "F5" 대신 "5"
    fn key_text(key: &str, slot_width: u16) -> &str {
        if slot_width < 9 {
            key.strip_prefix('F').unwrap_or(key)
        } else {
            key
        }
    }
}

impl Widget for CommandBar {
    /// Norton Commander처럼 항목마다 같은 폭의 칸을 나눠 쓴다
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));
        if self.commands.is_empty() || area.width == 0 || area.height == 0 {
            return;
        }

        let key_style = Style::default()
            .fg(self.key_color)
            .add_modifier(Modifier::BOLD);
        let label_style = Style::default().fg(self.label_color);

        let count = self.commands.len() as u16;
        let slot_width = (area.width / count).max(1);

        for (i, cmd) in self.commands.iter().enumerate() {
            let x = area.x + slot_width * i as u16;
            if x >= area.right() {
                break;
            }
            // 마지막 칸은 남는 폭까지
            let width = if i as u16 == count - 1 {
                area.right() - x
            } else {
                slot_width.min(area.right() - x)
            };

            let key = Self::key_text(&cmd.key, slot_width);
            let line = Line::from(vec![
                Span::styled(key, key_style),
                Span::styled(cmd.label.as_str(), label_style),
            ]);
            buf.set_line(x, area.y, &line, width.saturating_sub(1).max(1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, area: Rect) -> String {
        (0..area.width)
            .map(|x| {
                buf.cell((x, 0))
                    .map(|cell| cell.symbol().to_string())
                    .unwrap_or_default()
            })
            .collect()
    }

    #[test]
    fn test_command_item_creation() {
        let item = CommandItem::new("F1", "Help");
        assert_eq!(item.key, "F1");
        assert_eq!(item.label, "Help");
    }

    #[test]
    fn test_items_get_equal_slots() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        CommandBar::new()
            .commands(vec![CommandItem::new("F5", "Copy"), CommandItem::new("F6", "Move")])
            .render(area, &mut buf);

        let text = row_text(&buf, area);
        assert!(text.starts_with("F5Copy"));
        assert_eq!(&text[20..26], "F6Move");
    }

    #[test]
    fn test_narrow_bar_drops_f_prefix() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        let items = ["F1", "F2", "F3", "F5", "F6", "F7", "F8", "F10"]
            .iter()
            .map(|k| CommandItem::new(*k, "Xyzw"))
            .collect();
        CommandBar::new().commands(items).render(area, &mut buf);

        let text = row_text(&buf, area);
        assert!(text.starts_with("1Xyz"));
        assert!(text.contains("10Xy"));
    }
}
