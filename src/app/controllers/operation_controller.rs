use super::super::*;

/// 파일 작업, 마킹, 정렬 액션
pub(in crate::app) fn execute(app: &mut App, action: Action) {
    match action {
        Action::OpenExternally => app.open_focused_externally(),
        Action::Copy => app.start_transfer(OperationType::Copy),
        Action::Move => app.start_transfer(OperationType::Move),
        Action::Delete => app.start_delete(),
        Action::MakeDirectory => app.start_mkdir(),
        Action::Rename => app.start_rename(),
        Action::ToggleSelection => app.active_pane_mut().toggle_selection_at_cursor(),
        Action::SelectAll => app.active_pane_mut().select_all(),
        Action::DeselectAll => app.active_pane_mut().clear_selection(),
        Action::InvertSelection => app.active_pane_mut().invert_selection(),
        Action::SortByName => app.sort_active_panel(SortKey::Name),
        Action::SortByExt => app.sort_active_panel(SortKey::Extension),
        Action::SortByDate => app.sort_active_panel(SortKey::Modified),
        Action::SortBySize => app.sort_active_panel(SortKey::Size),
        Action::SortByType => app.sort_active_panel(SortKey::Type),
        _ => unreachable!("non-operation action: {:?}", action),
    }
}
