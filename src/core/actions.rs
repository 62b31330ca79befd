//! 액션 시스템
//!
//! 키 바인딩, 커맨드바 항목, 도움말 내용이 모두 이 모듈의 레지스트리를 참조한다.

use crate::ui::components::command_bar::CommandItem;
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::LazyLock;

/// 모든 가능한 액션의 열거
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,
    EnterSelected,
    TogglePanel,
    // File Operations
    OpenExternally,
    Copy,
    Move,
    Delete,
    MakeDirectory,
    Rename,
    ViewFile,
    // Selection
    ToggleSelection,
    SelectAll,
    DeselectAll,
    InvertSelection,
    // Sort
    SortByName,
    SortByExt,
    SortByDate,
    SortBySize,
    SortByType,
    // System
    Refresh,
    ToggleHidden,
    ShowHelp,
    Quit,
}

/// 액션 카테고리
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    FileOperation,
    Selection,
    Sort,
    System,
}

impl ActionCategory {
    pub fn title(self) -> &'static str {
        match self {
            ActionCategory::Navigation => "Navigation",
            ActionCategory::FileOperation => "File Operations",
            ActionCategory::Selection => "Selection",
            ActionCategory::Sort => "Sort",
            ActionCategory::System => "System",
        }
    }
}

/// 커맨드바 표시 정보
pub struct CommandBarEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub priority: u8,
}

/// 액션 정의 (메타데이터)
pub struct ActionDef {
    pub action: Action,
    pub label: &'static str,
    pub category: ActionCategory,
    pub shortcut_display: Option<&'static str>,
    pub command_bar: Option<CommandBarEntry>,
}

/// 키 바인딩 정의
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Option<KeyModifiers>, // None = any modifier
    pub action: Action,
}

macro_rules! def {
    ($action:ident, $label:literal, $cat:ident, $shortcut:expr) => {
        ActionDef {
            action: Action::$action,
            label: $label,
            category: ActionCategory::$cat,
            shortcut_display: $shortcut,
            command_bar: None,
        }
    };
    ($action:ident, $label:literal, $cat:ident, $shortcut:expr, $key:literal, $bar:literal, $prio:literal) => {
        ActionDef {
            action: Action::$action,
            label: $label,
            category: ActionCategory::$cat,
            shortcut_display: $shortcut,
            command_bar: Some(CommandBarEntry {
                key: $key,
                label: $bar,
                priority: $prio,
            }),
        }
    };
}

/// 모든 액션 메타데이터
pub static ACTION_DEFS: &[ActionDef] = &[
    // Navigation
    def!(MoveUp, "Move up", Navigation, Some("↑ / ↓")),
    def!(MoveDown, "Move down", Navigation, None),
    def!(PageUp, "Page up / down", Navigation, Some("PgUp / PgDn")),
    def!(PageDown, "Page down", Navigation, None),
    def!(GoToTop, "Top / bottom", Navigation, Some("Home / End")),
    def!(GoToBottom, "Bottom", Navigation, None),
    def!(EnterSelected, "Open dir / file", Navigation, Some("Enter")),
    def!(TogglePanel, "Switch pane", Navigation, Some("Tab")),
    // File Operations
    def!(OpenExternally, "Open / reveal in OS", FileOperation, Some("Shift+Enter")),
    def!(Rename, "Rename", FileOperation, Some("F2"), "F2", "Rename", 20),
    def!(ViewFile, "View file", FileOperation, Some("F3"), "F3", "View", 30),
    def!(Copy, "Copy to other pane", FileOperation, Some("F5"), "F5", "Copy", 50),
    def!(Move, "Move to other pane", FileOperation, Some("F6"), "F6", "Move", 60),
    def!(MakeDirectory, "Create directory", FileOperation, Some("F7"), "F7", "MkDir", 70),
    def!(Delete, "Delete", FileOperation, Some("F8 / Del / Bksp"), "F8", "Delete", 80),
    // Selection
    def!(ToggleSelection, "Mark / unmark", Selection, Some("Space / Ins")),
    def!(SelectAll, "Mark all", Selection, Some("Ctrl+A")),
    def!(DeselectAll, "Unmark all", Selection, Some("Ctrl+D")),
    def!(InvertSelection, "Invert marks", Selection, Some("*")),
    // Sort
    def!(SortByName, "Sort by name", Sort, Some("Ctrl+F3")),
    def!(SortByExt, "Sort by extension", Sort, Some("Ctrl+F4")),
    def!(SortByDate, "Sort by date", Sort, Some("Ctrl+F5")),
    def!(SortBySize, "Sort by size", Sort, Some("Ctrl+F6")),
    def!(SortByType, "Sort by type", Sort, Some("Ctrl+F7")),
    // System
    def!(ShowHelp, "Help", System, Some("F1"), "F1", "Help", 10),
    def!(Refresh, "Refresh", System, Some("Ctrl+R")),
    def!(ToggleHidden, "Show / hide hidden files", System, Some("Ctrl+H")),
    def!(Quit, "Quit", System, Some("F10 / q"), "F10", "Quit", 100),
];

fn bind(code: KeyCode, modifiers: Option<KeyModifiers>, action: Action) -> KeyBinding {
    KeyBinding {
        code,
        modifiers,
        action,
    }
}

fn build_key_bindings() -> Vec<KeyBinding> {
    let none = Some(KeyModifiers::NONE);
    let ctrl = Some(KeyModifiers::CONTROL);
    let shift = Some(KeyModifiers::SHIFT);

    vec![
        // 종료
        bind(KeyCode::F(10), None, Action::Quit),
        bind(KeyCode::Char('q'), none, Action::Quit),
        bind(KeyCode::Char('c'), ctrl, Action::Quit),
        // 탐색
        bind(KeyCode::Tab, None, Action::TogglePanel),
        bind(KeyCode::BackTab, None, Action::TogglePanel),
        bind(KeyCode::Up, None, Action::MoveUp),
        bind(KeyCode::Down, None, Action::MoveDown),
        bind(KeyCode::PageUp, None, Action::PageUp),
        bind(KeyCode::PageDown, None, Action::PageDown),
        bind(KeyCode::Home, None, Action::GoToTop),
        bind(KeyCode::End, None, Action::GoToBottom),
        bind(KeyCode::Enter, shift, Action::OpenExternally),
        bind(KeyCode::Enter, None, Action::EnterSelected),
        // 파일 작업
        bind(KeyCode::Backspace, None, Action::Delete),
        bind(KeyCode::Delete, None, Action::Delete),
        bind(KeyCode::F(8), None, Action::Delete),
        bind(KeyCode::F(5), none, Action::Copy),
        bind(KeyCode::F(6), none, Action::Move),
        bind(KeyCode::F(7), none, Action::MakeDirectory),
        bind(KeyCode::F(2), None, Action::Rename),
        bind(KeyCode::F(3), none, Action::ViewFile),
        // 선택
        bind(KeyCode::Char(' '), None, Action::ToggleSelection),
        bind(KeyCode::Insert, None, Action::ToggleSelection),
        bind(KeyCode::Char('a'), ctrl, Action::SelectAll),
        bind(KeyCode::Char('d'), ctrl, Action::DeselectAll),
        bind(KeyCode::Char('*'), None, Action::InvertSelection),
        // 정렬
        bind(KeyCode::F(3), ctrl, Action::SortByName),
        bind(KeyCode::F(4), ctrl, Action::SortByExt),
        bind(KeyCode::F(5), ctrl, Action::SortByDate),
        bind(KeyCode::F(6), ctrl, Action::SortBySize),
        bind(KeyCode::F(7), ctrl, Action::SortByType),
        // 시스템
        bind(KeyCode::F(1), None, Action::ShowHelp),
        bind(KeyCode::Char('r'), ctrl, Action::Refresh),
        bind(KeyCode::Char('h'), ctrl, Action::ToggleHidden),
    ]
}

static KEY_BINDINGS: LazyLock<Vec<KeyBinding>> = LazyLock::new(build_key_bindings);

/// 키 바인딩 목록 조회 (1회 초기화 후 재사용)
pub fn key_bindings() -> &'static [KeyBinding] {
    KEY_BINDINGS.as_slice()
}

/// 키 입력으로 액션 조회
pub fn find_action(modifiers: KeyModifiers, code: KeyCode) -> Option<Action> {
    key_bindings()
        .iter()
        .find(|binding| {
            let mod_matches = match binding.modifiers {
                None => true,
                Some(required) => modifiers == required,
            };
            binding.code == code && mod_matches
        })
        .map(|binding| binding.action)
}

// === 북마크 단축키 ===

/// 북마크 명령 (Alt+Shift+키 = 저장, Alt+키 = 이동)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkCommand {
    Store(char),
    Recall(char),
}

/// Shift+숫자가 만드는 기호 (US 배열, 1..9 그리고 0)
const SHIFTED_DIGITS: &str = "!@#$%^&*()";
const DIGITS: &str = "1234567890";

/// 북마크 키 정규화
///
/// ASCII 문자/숫자만 허용하고 소문자로 바꾼다. Shift로 바뀐 숫자 기호는 숫자로 되돌린다.
pub fn normalize_bookmark_key(c: char) -> Option<char> {
    if c.is_ascii_alphanumeric() {
        return Some(c.to_ascii_lowercase());
    }
    SHIFTED_DIGITS
        .chars()
        .position(|s| s == c)
        .and_then(|i| DIGITS.chars().nth(i))
}

/// 키 입력을 북마크 명령으로 해석
pub fn find_bookmark_command(modifiers: KeyModifiers, code: KeyCode) -> Option<BookmarkCommand> {
    if !modifiers.contains(KeyModifiers::ALT) || modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    let KeyCode::Char(c) = code else {
        return None;
    };
    let key = normalize_bookmark_key(c)?;

    // 터미널에 따라 SHIFT 플래그 없이 대문자/기호만 오기도 한다
    let shifted = modifiers.contains(KeyModifiers::SHIFT)
        || c.is_ascii_uppercase()
        || SHIFTED_DIGITS.contains(c);

    Some(if shifted {
        BookmarkCommand::Store(key)
    } else {
        BookmarkCommand::Recall(key)
    })
}

// === 커맨드바 / 도움말 ===

/// 커맨드바용 항목 생성 (priority 순 정렬)
pub fn generate_command_bar_items() -> Vec<CommandItem> {
    let mut entries: Vec<&CommandBarEntry> = ACTION_DEFS
        .iter()
        .filter_map(|def| def.command_bar.as_ref())
        .collect();

    entries.sort_by_key(|cb| cb.priority);

    entries
        .into_iter()
        .map(|cb| CommandItem::new(cb.key, cb.label))
        .collect()
}

/// 도움말 다이얼로그용 엔트리 생성
///
/// 반환: (카테고리명, Vec<(단축키, 설명)>) 목록
pub fn generate_help_entries() -> Vec<(&'static str, Vec<(&'static str, &'static str)>)> {
    let categories = [
        ActionCategory::Navigation,
        ActionCategory::FileOperation,
        ActionCategory::Selection,
        ActionCategory::Sort,
        ActionCategory::System,
    ];

    let mut sections: Vec<(&'static str, Vec<(&'static str, &'static str)>)> = categories
        .iter()
        .map(|cat| {
            let items: Vec<(&'static str, &'static str)> = ACTION_DEFS
                .iter()
                .filter(|d| d.category == *cat)
                .filter_map(|d| d.shortcut_display.map(|s| (s, d.label)))
                .collect();
            (cat.title(), items)
        })
        .filter(|(_, items)| !items.is_empty())
        .collect();

    sections.push((
        "Bookmarks",
        vec![
            ("Alt+Shift+key", "Save current dir"),
            ("Alt+key", "Jump to saved dir"),
        ],
    ));
    sections
}
