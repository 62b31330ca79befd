//! 한 프레임 그리기 (레이아웃은 호출 전에 `LayoutManager::update`로 계산되어 있어야 함)

use crate::app::App;
use crate::core::actions::generate_command_bar_items;
use crate::models::PaneModel;
use crate::ui::{ActivePanel, CommandBar, Dialog, Panel, StatusBar, Theme, WarningScreen};
use crate::utils::formatter::format_file_size;
use ratatui::{layout::Rect, Frame};

/// 전체 화면 렌더링
pub fn render(f: &mut Frame<'_>, app: &App) {
    let theme = &app.theme;

    if app.layout.is_too_small() {
        let (width, height) = app.layout.terminal_size();
        let warning = WarningScreen::new().current_size(width, height).theme(theme);
        f.render_widget(warning, f.area());
        return;
    }

    let areas = app.layout.areas();
    let active = app.active_panel();

    render_pane(f, &app.left, active == ActivePanel::Left, theme, areas.left_panel);
    render_pane(f, &app.right, active == ActivePanel::Right, theme, areas.right_panel);

    render_status_bar(f, app, theme, areas.status_bar);

    let command_bar = CommandBar::new()
        .commands(generate_command_bar_items())
        .theme(theme);
    f.render_widget(command_bar, areas.command_bar);

    if let Some(ref kind) = app.dialog {
        let dialog = Dialog::new(kind).theme(theme);
        f.render_widget(dialog, f.area());
    }
}

/// 패널 하나 (싱글 모드의 숨은 패널은 폭 0이라 건너뜀)
fn render_pane(f: &mut Frame<'_>, pane: &PaneModel, is_active: bool, theme: &Theme, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let panel = Panel::new()
        .root(pane.root())
        .items(pane.items())
        .cursor(pane.cursor())
        .scroll_offset(pane.scroll_offset())
        .selection(pane.selection())
        .sort(pane.sort())
        .theme(theme);
    let panel = if is_active {
        panel.active()
    } else {
        panel.inactive()
    };
    f.render_widget(panel, area);
}

/// 상태바: 활성 패널 요약 + 토스트
fn render_status_bar(f: &mut Frame<'_>, app: &App, theme: &Theme, area: Rect) {
    let pane = app.active_pane();
    let (file_count, dir_count) = pane.counts();
    let selected_size = format_file_size(pane.selected_size());

    let status_bar = StatusBar::new()
        .root(pane.root())
        .file_count(file_count)
        .dir_count(dir_count)
        .selected_count(pane.selection().len())
        .selected_size(&selected_size)
        .message(app.toast_display())
        .theme(theme);
    f.render_widget(status_bar, area);
}
