// Layout system - 반응형 레이아웃
//
// 터미널 크기에 따른 레이아웃 모드:
// - 80+ cols: 듀얼 패널 모드
// - 40-79 cols: 싱글 패널 모드 (Tab으로 전환)
// - <40 cols: 경고 메시지 표시

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// 최소 터미널 크기 상수
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 10;
pub const DUAL_PANEL_MIN_WIDTH: u16 = 80;

/// 패널 테두리(2) + 컬럼 헤더(1)
const PANEL_CHROME_ROWS: u16 = 3;

/// 레이아웃 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// 듀얼 패널 모드 (80+ cols)
    DualPanel,
    /// 싱글 패널 모드 (40-79 cols)
    SinglePanel,
    /// 경고 모드 (터미널이 너무 작음)
    TooSmall,
}

/// 활성 패널
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivePanel {
    #[default]
    Left,
    Right,
}

impl ActivePanel {
    /// 패널 전환
    pub fn toggle(&mut self) {
        *self = self.other();
    }

    /// 반대쪽 패널 (복사/이동 대상)
    pub fn other(self) -> Self {
        match self {
            ActivePanel::Left => ActivePanel::Right,
            ActivePanel::Right => ActivePanel::Left,
        }
    }
}

/// 레이아웃 영역
#[derive(Debug, Clone, Default)]
pub struct LayoutAreas {
    pub left_panel: Rect,
    pub right_panel: Rect,
    pub status_bar: Rect,
    pub command_bar: Rect,
    /// TooSmall 모드에서 사용
    pub warning: Rect,
}

/// 레이아웃 매니저
#[derive(Debug)]
pub struct LayoutManager {
    mode: LayoutMode,
    active_panel: ActivePanel,
    terminal_size: (u16, u16),
    areas: LayoutAreas,
}

impl Default for LayoutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutManager {
    pub fn new() -> Self {
        Self {
            mode: LayoutMode::DualPanel,
            active_panel: ActivePanel::default(),
            terminal_size: (80, 24),
            areas: LayoutAreas::default(),
        }
    }

    fn determine_mode(width: u16, height: u16) -> LayoutMode {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            LayoutMode::TooSmall
        } else if width < DUAL_PANEL_MIN_WIDTH {
            LayoutMode::SinglePanel
        } else {
            LayoutMode::DualPanel
        }
    }

    /// 터미널 크기 업데이트 및 레이아웃 재계산
    pub fn update(&mut self, area: Rect) {
        self.terminal_size = (area.width, area.height);
        self.mode = Self::determine_mode(area.width, area.height);
        self.areas = self.calculate_areas(area);
    }

    fn calculate_areas(&self, area: Rect) -> LayoutAreas {
        if self.mode == LayoutMode::TooSmall {
            return LayoutAreas {
                warning: area,
                ..Default::default()
            };
        }

        // 패널 | 상태바 | 커맨드바
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let (left_panel, right_panel) = if self.mode == LayoutMode::DualPanel {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[0]);
            (columns[0], columns[1])
        } else {
            // 싱글 패널 모드에서는 활성 패널만 전체 너비 사용
            match self.active_panel {
                ActivePanel::Left => (rows[0], Rect::default()),
                ActivePanel::Right => (Rect::default(), rows[0]),
            }
        };

        LayoutAreas {
            left_panel,
            right_panel,
            status_bar: rows[1],
            command_bar: rows[2],
            warning: Rect::default(),
        }
    }

    pub fn areas(&self) -> &LayoutAreas {
        &self.areas
    }

    pub fn active_panel(&self) -> ActivePanel {
        self.active_panel
    }

    /// 패널 전환 (싱글 모드면 영역도 다시 계산)
    pub fn toggle_panel(&mut self) {
        self.active_panel.toggle();
        let (width, height) = self.terminal_size;
        self.areas = self.calculate_areas(Rect::new(0, 0, width, height));
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// 패널 하나에 보이는 목록 행 수
    pub fn panel_rows(&self) -> usize {
        let (_, height) = self.terminal_size;
        // 상태바 + 커맨드바 제외
        let panel_height = height.saturating_sub(2);
        panel_height.saturating_sub(PANEL_CHROME_ROWS).max(1) as usize
    }

    pub fn is_too_small(&self) -> bool {
        self.mode == LayoutMode::TooSmall
    }
}
