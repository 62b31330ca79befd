use super::super::*;

/// 화면/표시 관련 액션
pub(in crate::app) fn execute(app: &mut App, action: Action) {
    match action {
        Action::ShowHelp => app.show_help(),
        Action::Refresh => {
            app.refresh_current();
            app.set_toast("Refreshed");
        }
        Action::ToggleHidden => app.toggle_hidden(),
        Action::ViewFile => app.view_focused_file(),
        _ => unreachable!("non-dialog action: {:?}", action),
    }
}
