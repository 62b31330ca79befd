use crate::config::Settings;
use crate::core::actions::Action;
use crate::models::operation::{ConflictPolicy, OperationReport, OperationType, PendingOperation};
use crate::models::{PaneChange, PaneModel, SortDescriptor, SortKey};
use crate::system::FileSystem;
use crate::ui::{ActivePanel, DialogKind, InputPurpose, LayoutManager, Theme};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

mod bookmarks;
mod controllers;
mod dialogs;
mod navigation;
mod operations;
mod text_edit;

/// 앱 상태
pub struct App {
    /// 종료 플래그
    pub should_quit: bool,
    /// 레이아웃 매니저 (활성 패널 포함)
    pub layout: LayoutManager,
    /// 좌측 패널
    pub left: PaneModel,
    /// 우측 패널
    pub right: PaneModel,
    pub filesystem: FileSystem,
    /// 사용자 설정
    pub settings: Settings,
    /// 설정 저장 위치 (None이면 저장하지 않음)
    settings_path: Option<PathBuf>,
    /// 현재 표시 중인 다이얼로그
    pub dialog: Option<DialogKind>,
    /// 확인/충돌 응답을 기다리는 파일 작업
    pub pending_operation: Option<PendingOperation>,
    /// 토스트 메시지 (3초 후 자동 소멸)
    pub toast_message: Option<(String, Instant)>,
    pub theme: Theme,
}

impl App {
    /// 두 패널 루트와 설정 파일 경로로 생성
    pub fn new(left_dir: PathBuf, right_dir: PathBuf, settings_path: Option<PathBuf>) -> Result<Self> {
        let settings = settings_path
            .as_deref()
            .map(Settings::load_from)
            .unwrap_or_default();
        Self::with_settings(left_dir, right_dir, settings, settings_path)
    }

    fn with_settings(
        left_dir: PathBuf,
        right_dir: PathBuf,
        settings: Settings,
        settings_path: Option<PathBuf>,
    ) -> Result<Self> {
        let sort = settings.sort_descriptor();
        let left = PaneModel::open(left_dir, sort, settings.show_hidden)?;
        let right = PaneModel::open(right_dir, sort, settings.show_hidden)?;
        info!(
            left = %left.root().display(),
            right = %right.root().display(),
            "panes opened"
        );

        Ok(Self {
            should_quit: false,
            layout: LayoutManager::new(),
            left,
            right,
            filesystem: FileSystem::new(),
            settings,
            settings_path,
            dialog: None,
            pending_operation: None,
            toast_message: None,
            theme: Theme::dark(),
        })
    }

    /// 테스트용: 설정 파일을 `settings_dir` 안으로 격리
    #[cfg(test)]
    pub(crate) fn new_for_test(left_dir: &Path, right_dir: &Path, settings_dir: &Path) -> Self {
        Self::new(
            left_dir.to_path_buf(),
            right_dir.to_path_buf(),
            Some(settings_dir.join("settings.toml")),
        )
        .expect("test panes must open")
    }

    /// 종료
    pub fn quit(&mut self) {
        info!("quit requested");
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// 설정 저장 (실패는 토스트와 로그로만 알림)
    pub(super) fn save_settings(&mut self) {
        let Some(path) = self.settings_path.clone() else {
            return;
        };
        if let Err(e) = self.settings.save_to(&path) {
            warn!(path = %path.display(), error = %e, "cannot save settings");
            self.set_toast(&format!("Cannot save settings: {}", e));
        }
    }

    /// 패널 전환 (Tab)
    pub fn toggle_panel(&mut self) {
        self.layout.toggle_panel();
        debug!(active = ?self.active_panel(), "switched pane");
    }

    pub fn active_panel(&self) -> ActivePanel {
        self.layout.active_panel()
    }

    pub fn pane(&self, panel: ActivePanel) -> &PaneModel {
        match panel {
            ActivePanel::Left => &self.left,
            ActivePanel::Right => &self.right,
        }
    }

    pub fn pane_mut(&mut self, panel: ActivePanel) -> &mut PaneModel {
        match panel {
            ActivePanel::Left => &mut self.left,
            ActivePanel::Right => &mut self.right,
        }
    }

    /// 활성 패널
    pub fn active_pane(&self) -> &PaneModel {
        self.pane(self.active_panel())
    }

    pub fn active_pane_mut(&mut self) -> &mut PaneModel {
        self.pane_mut(self.active_panel())
    }

    /// 반대쪽 패널 (복사/이동 대상)
    pub fn other_pane(&self) -> &PaneModel {
        self.pane(self.active_panel().other())
    }

    pub fn other_pane_mut(&mut self) -> &mut PaneModel {
        self.pane_mut(self.active_panel().other())
    }

    /// 현재 활성 패널의 경로
    pub fn active_path(&self) -> &Path {
        self.active_pane().root()
    }

    /// 두 패널에 쌓인 변경 알림 처리 후 스크롤 위치 맞추기
    pub fn process_pane_changes(&mut self) {
        for panel in [ActivePanel::Left, ActivePanel::Right] {
            for change in self.pane_mut(panel).drain_changes() {
                match change {
                    PaneChange::RootChanged(root) => {
                        info!(pane = ?panel, root = %root.display(), "pane root changed")
                    }
                    PaneChange::Refreshed => debug!(pane = ?panel, "pane refreshed"),
                    PaneChange::SelectionChanged => debug!(pane = ?panel, "selection changed"),
                    PaneChange::SortChanged(sort) => {
                        debug!(pane = ?panel, key = ?sort.key, ascending = sort.ascending, "sort changed")
                    }
                }
            }
        }
        self.sync_scroll();
    }

    /// 커서가 보이도록 두 패널 스크롤 조정
    pub fn sync_scroll(&mut self) {
        let rows = self.layout.panel_rows();
        self.left.adjust_scroll(rows);
        self.right.adjust_scroll(rows);
    }
}

#[cfg(test)]
mod tests;
