// Panel component - 파일 패널 컴포넌트
//
// 디렉토리 목록 표 (Type / Name / Size / Modified), 커서와 마킹 표시

use crate::models::file_entry::{FileEntry, FileType};
use crate::models::pane_model::{SortDescriptor, SortKey};
use crate::ui::Theme;
use crate::utils::formatter::{format_file_size, format_optional_date};
use crate::utils::path_display::{truncate_name, truncate_path};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use std::collections::BTreeSet;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// 패널 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelStatus {
    #[default]
    Inactive,
    Active,
}

static EMPTY_SELECTION: BTreeSet<usize> = BTreeSet::new();

/// 패널 컴포넌트
pub struct Panel<'a> {
    /// 패널 제목 (루트 경로)
    root: &'a Path,
    status: PanelStatus,
    /// 파일 목록 ("..") 포함
    items: &'a [FileEntry],
    cursor: usize,
    scroll_offset: usize,
    /// 마킹된 항목 (items 인덱스)
    selection: &'a BTreeSet<usize>,
    sort: SortDescriptor,
    theme: Theme,
}

impl Default for Panel<'_> {
    fn default() -> Self {
        Self {
            root: Path::new(""),
            status: PanelStatus::default(),
            items: &[],
            cursor: 0,
            scroll_offset: 0,
            selection: &EMPTY_SELECTION,
            sort: SortDescriptor::default(),
            theme: Theme::dark(),
        }
    }
}

impl<'a> Panel<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(mut self, root: &'a Path) -> Self {
        self.root = root;
        self
    }

    pub fn active(mut self) -> Self {
        self.status = PanelStatus::Active;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.status = PanelStatus::Inactive;
        self
    }

    pub fn items(mut self, items: &'a [FileEntry]) -> Self {
        self.items = items;
        self
    }

    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    pub fn selection(mut self, selection: &'a BTreeSet<usize>) -> Self {
        self.selection = selection;
        self
    }

    pub fn sort(mut self, sort: SortDescriptor) -> Self {
        self.sort = sort;
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.theme = theme.clone();
        self
    }

    fn is_active(&self) -> bool {
        self.status == PanelStatus::Active
    }

    /// Type 컬럼 표기
    fn type_label(file_type: FileType) -> &'static str {
        match file_type {
            FileType::ParentLink => "UP",
            FileType::Directory => "DIR",
            FileType::Symlink => "LNK",
            FileType::Executable => "EXE",
            FileType::File => "",
        }
    }

    fn entry_color(&self, entry: &FileEntry) -> Color {
        if entry.is_hidden {
            return self.theme.hidden;
        }
        match entry.file_type {
            FileType::ParentLink | FileType::Directory => self.theme.directory,
            FileType::Symlink => self.theme.symlink,
            FileType::Executable => self.theme.executable,
            FileType::File => self.theme.file_normal,
        }
    }
}

/// 컬럼 레이아웃
struct ColumnLayout {
    show_date: bool,
    name_width: usize,
}

const MARK_WIDTH: usize = 1;
const TYPE_WIDTH: usize = 6;
const SIZE_WIDTH: usize = 9;
const DATE_WIDTH: usize = 16;

impl Panel<'_> {
    /// 패널 너비 기반 컬럼 표시 여부/크기 결정
    fn calculate_column_layout(width: usize) -> ColumnLayout {
        let show_date = width >= 50;
        // 컬럼 사이 공백
        let gaps = if show_date { 3 } else { 2 };
        let fixed = MARK_WIDTH
            + TYPE_WIDTH
            + SIZE_WIDTH
            + gaps
            + if show_date { DATE_WIDTH } else { 0 };
        ColumnLayout {
            show_date,
            name_width: width.saturating_sub(fixed).max(1),
        }
    }

    fn header_label(&self, key: SortKey, text: &str) -> String {
        if self.sort.key == key {
            format!("{} {}", text, if self.sort.ascending { "▲" } else { "▼" })
        } else {
            text.to_string()
        }
    }

    fn render_header(&self, layout: &ColumnLayout, inner: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.theme.panel_header)
            .add_modifier(Modifier::BOLD);

        // Extension 정렬은 Name 컬럼에 표시
        let name_label = if self.sort.key == SortKey::Extension {
            self.header_label(SortKey::Extension, "Name(Ext)")
        } else {
            self.header_label(SortKey::Name, "Name")
        };

        let mut spans = vec![
            Span::raw(" "),
            Span::styled(
                pad_right(&self.header_label(SortKey::Type, "Type"), TYPE_WIDTH),
                style,
            ),
            Span::raw(" "),
            Span::styled(pad_right(&name_label, layout.name_width), style),
            Span::raw(" "),
            Span::styled(
                pad_left(&self.header_label(SortKey::Size, "Size"), SIZE_WIDTH),
                style,
            ),
        ];
        if layout.show_date {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                pad_right(&self.header_label(SortKey::Modified, "Modified"), DATE_WIDTH),
                style,
            ));
        }

        buf.set_line(inner.x, inner.y, &Line::from(spans), inner.width);
    }

    fn render_row(
        &self,
        index: usize,
        entry: &FileEntry,
        layout: &ColumnLayout,
        area: Rect,
        y: u16,
        buf: &mut Buffer,
    ) {
        let is_cursor = index == self.cursor;
        let is_marked = self.selection.contains(&index);

        let fg = match (is_cursor && self.is_active(), is_marked) {
            (_, true) => self.theme.file_marked,
            (true, false) => self.theme.file_cursor,
            (false, false) => self.entry_color(entry),
        };
        let mut style = Style::default().fg(fg);
        if is_cursor {
            let bg = if self.is_active() {
                self.theme.file_cursor_bg
            } else {
                self.theme.file_cursor_inactive_bg
            };
            style = style.bg(bg);
        }
        if is_marked {
            style = style.add_modifier(Modifier::BOLD);
        }

        let size = if entry.is_directory() {
            String::new()
        } else {
            format_file_size(entry.size)
        };

        let mut spans = vec![
            Span::styled(if is_marked { "*" } else { " " }, style),
            Span::styled(pad_right(Self::type_label(entry.file_type), TYPE_WIDTH), style),
            Span::styled(" ", style),
            Span::styled(
                pad_right(&truncate_name(&entry.name, layout.name_width), layout.name_width),
                style,
            ),
            Span::styled(" ", style),
            Span::styled(pad_left(&size, SIZE_WIDTH), style),
        ];
        if layout.show_date {
            let date = if entry.is_parent_link() {
                String::new()
            } else {
                format_optional_date(entry.modified)
            };
            spans.push(Span::styled(" ", style));
            spans.push(Span::styled(pad_right(&date, DATE_WIDTH), style));
        }

        // 커서 행은 끝까지 배경색 채움
        let used: usize = spans.iter().map(|s| s.content.width()).sum();
        let rest = (area.width as usize).saturating_sub(used);
        spans.push(Span::styled(" ".repeat(rest), style));

        buf.set_line(area.x, y, &Line::from(spans), area.width);
    }

    fn render_scrollbar(&self, track: Rect, buf: &mut Buffer) {
        let total = self.items.len();
        let height = track.height as usize;
        if total <= height || height == 0 {
            return;
        }

        let thumb_height = (height * height / total).max(1);
        let max_scroll = total - height;
        let thumb_pos = self.scroll_offset.min(max_scroll) * (height - thumb_height) / max_scroll;

        let x = track.x + track.width - 1;
        for i in 0..height {
            let (symbol, color) = if i >= thumb_pos && i < thumb_pos + thumb_height {
                ("┃", self.theme.meta)
            } else {
                ("│", self.theme.panel_inactive_border)
            };
            buf.set_string(x, track.y + i as u16, symbol, Style::default().fg(color));
        }
    }
}

impl Widget for Panel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let title_max_width = (area.width as usize).saturating_sub(4);
        let title = truncate_path(self.root, title_max_width);
        let border_color = if self.is_active() {
            self.theme.panel_active_border
        } else {
            self.theme.panel_inactive_border
        };
        let title_style = if self.is_active() {
            Style::default()
                .fg(self.theme.file_cursor)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.meta)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(Span::styled(format!(" {} ", title), title_style))
            .style(Style::default().bg(self.theme.bg_primary));

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 2 {
            return;
        }

        let has_scrollbar = self.items.len() > (inner.height as usize - 1);
        let list_width = inner.width.saturating_sub(u16::from(has_scrollbar));
        let layout = Self::calculate_column_layout(list_width as usize);

        self.render_header(&layout, inner, buf);

        let list = Rect::new(inner.x, inner.y + 1, list_width, inner.height - 1);
        if self.items.is_empty() {
            buf.set_string(
                list.x,
                list.y,
                " (empty)",
                Style::default().fg(self.theme.meta),
            );
            return;
        }

        let end = (self.scroll_offset + list.height as usize).min(self.items.len());
        for (row, index) in (self.scroll_offset..end).enumerate() {
            self.render_row(
                index,
                &self.items[index],
                &layout,
                list,
                list.y + row as u16,
                buf,
            );
        }

        if has_scrollbar {
            let track = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);
            self.render_scrollbar(track, buf);
        }
    }
}

fn pad_right(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(pad))
}

fn pad_left(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{}{}", " ".repeat(pad), text)
}
