use ratatui::style::Color;

/// 색상 테마
///
/// 다크 테마 하나만 제공한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // 배경/전경
    pub bg_primary: Color,
    pub fg_primary: Color,

    // 패널
    pub panel_active_border: Color,
    pub panel_inactive_border: Color,
    pub panel_header: Color,

    // 파일 리스트
    pub file_normal: Color,
    pub file_cursor: Color,
    pub file_cursor_bg: Color,
    pub file_cursor_inactive_bg: Color,
    pub file_marked: Color,
    pub directory: Color,
    pub executable: Color,
    pub symlink: Color,
    pub hidden: Color,
    pub meta: Color,

    // UI 컴포넌트
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub command_bar_bg: Color,
    pub command_key: Color,
    pub command_label: Color,
    pub dialog_bg: Color,
    pub dialog_border: Color,
    pub button_focus_bg: Color,

    // 강조
    pub accent: Color,
    pub warning: Color,
    pub error: Color,
}

/// "#rrggbb" → Color (형식이 틀리면 Reset)
pub fn hex(value: &str) -> Color {
    let digits = value.trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Color::Reset;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::Reset,
    }
}

impl Theme {
    /// Dark 테마 (기본)
    pub fn dark() -> Self {
        Theme {
            bg_primary: hex("#1e1e1e"),
            fg_primary: hex("#d4d4d4"),

            panel_active_border: hex("#0078d4"),
            panel_inactive_border: hex("#3c3c3c"),
            panel_header: hex("#9cdcfe"),

            file_normal: hex("#d4d4d4"),
            file_cursor: hex("#ffffff"),
            file_cursor_bg: hex("#0078d4"),
            file_cursor_inactive_bg: hex("#3a3d41"),
            file_marked: hex("#dcdcaa"),
            directory: hex("#569cd6"),
            executable: hex("#4ec9b0"),
            symlink: hex("#ce9178"),
            hidden: hex("#6a6a6a"),
            meta: hex("#858585"),

            status_bar_bg: hex("#007acc"),
            status_bar_fg: hex("#ffffff"),
            command_bar_bg: hex("#1e1e1e"),
            command_key: hex("#0078d4"),
            command_label: hex("#d4d4d4"),
            dialog_bg: hex("#252526"),
            dialog_border: hex("#0078d4"),
            button_focus_bg: hex("#0e639c"),

            accent: hex("#0078d4"),
            warning: hex("#cca700"),
            error: hex("#f14c4c"),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
