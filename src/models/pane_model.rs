use crate::models::file_entry::FileEntry;
use crate::system::filesystem::FileSystem;
use crate::utils::error::Result;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::mem;
use std::path::{Path, PathBuf};

/// 정렬 기준
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// 파일 타입 (디렉토리 → 링크 → 실행 파일 → 파일)
    Type,
    /// 이름
    Name,
    /// 크기
    Size,
    /// 수정 날짜
    Modified,
    /// 확장자
    Extension,
}

impl SortKey {
    /// 설정 파일에 저장되는 이름
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Type => "type",
            SortKey::Name => "name",
            SortKey::Size => "size",
            SortKey::Modified => "modified",
            SortKey::Extension => "extension",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "type" => Some(SortKey::Type),
            "name" => Some(SortKey::Name),
            "size" => Some(SortKey::Size),
            "modified" | "date" => Some(SortKey::Modified),
            "extension" | "ext" => Some(SortKey::Extension),
            _ => None,
        }
    }

    /// 화면 표시용 이름
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Type => "Type",
            SortKey::Name => "Name",
            SortKey::Size => "Size",
            SortKey::Modified => "Date",
            SortKey::Extension => "Ext",
        }
    }
}

/// 정렬 상태 (기준 + 방향)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortDescriptor {
    pub key: SortKey,
    pub ascending: bool,
}

impl SortDescriptor {
    pub fn new(key: SortKey, ascending: bool) -> Self {
        Self { key, ascending }
    }

    /// `key`를 선택했을 때의 다음 정렬 상태
    ///
    /// 같은 기준을 다시 고르면 방향만 뒤집고, 다른 기준은 오름차순으로 시작한다.
    pub fn toggled(self, key: SortKey) -> Self {
        if self.key == key {
            Self::new(key, !self.ascending)
        } else {
            Self::new(key, true)
        }
    }

    /// 예: "Name ▲"
    pub fn indicator(self) -> String {
        format!("{} {}", self.key.label(), if self.ascending { "▲" } else { "▼" })
    }
}

impl Default for SortDescriptor {
    fn default() -> Self {
        Self::new(SortKey::Name, true)
    }
}

/// 모델 변경 알림
///
/// 모델이 큐에 쌓고, App이 이벤트 처리 후 `drain_changes()`로 꺼내 처리한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneChange {
    /// 루트 디렉토리 변경
    RootChanged(PathBuf),
    /// 같은 루트 재스캔
    Refreshed,
    /// 선택 집합 변경
    SelectionChanged,
    /// 정렬 기준/방향 변경
    SortChanged(SortDescriptor),
}

/// 한쪽 패널의 디렉토리 목록 상태
#[derive(Debug, Clone)]
pub struct PaneModel {
    /// 표시 중인 디렉토리
    root: PathBuf,
    /// 정렬된 목록 (상위 디렉토리가 있으면 첫 항목은 항상 "..")
    items: Vec<FileEntry>,
    /// 커서 위치 (items 인덱스)
    cursor: usize,
    /// 표시 시작 위치
    scroll_offset: usize,
    /// 마킹된 항목 (items 인덱스)
    selection: BTreeSet<usize>,
    sort: SortDescriptor,
    show_hidden: bool,
    changes: Vec<PaneChange>,
    filesystem: FileSystem,
}

impl PaneModel {
    /// 빈 모델 생성 (스캔 전)
    pub fn new(root: PathBuf, sort: SortDescriptor, show_hidden: bool) -> Self {
        Self {
            root,
            items: Vec::new(),
            cursor: 0,
            scroll_offset: 0,
            selection: BTreeSet::new(),
            sort,
            show_hidden,
            changes: Vec::new(),
            filesystem: FileSystem::new(),
        }
    }

    /// `root`를 스캔한 모델 생성
    pub fn open(root: PathBuf, sort: SortDescriptor, show_hidden: bool) -> Result<Self> {
        let mut model = Self::new(root.clone(), sort, show_hidden);
        model.set_root(root)?;
        model.changes.clear();
        Ok(model)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn items(&self) -> &[FileEntry] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn selection(&self) -> &BTreeSet<usize> {
        &self.selection
    }

    pub fn sort(&self) -> SortDescriptor {
        self.sort
    }

    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    /// 루트 변경
    ///
    /// 스캔에 실패하면 모델은 그대로 두고 에러를 반환한다.
    pub fn set_root(&mut self, path: PathBuf) -> Result<()> {
        let items = self.scan(&path)?;
        self.root = path;
        self.items = items;
        self.cursor = 0;
        self.scroll_offset = 0;
        self.selection.clear();
        self.changes.push(PaneChange::RootChanged(self.root.clone()));
        Ok(())
    }

    /// 같은 루트 재스캔
    ///
    /// 선택과 커서는 이름으로 다시 찾는다. 사라진 이름은 선택에서 빠지고,
    /// 커서 항목이 사라졌으면 이전 인덱스(범위 내로 조정)에 남는다.
    pub fn refresh(&mut self) -> Result<()> {
        let items = self.scan(&self.root)?;
        let selected_names = self.selected_names();
        let cursor_name = self.focused().map(|e| e.name.clone());
        let old_cursor = self.cursor;

        self.items = items;
        self.resolve_selection(&selected_names);
        self.cursor = cursor_name
            .and_then(|name| self.index_of(&name))
            .unwrap_or_else(|| old_cursor.min(self.items.len().saturating_sub(1)));

        self.changes.push(PaneChange::Refreshed);
        Ok(())
    }

    /// 숨김 파일 표시 전환 후 재스캔
    pub fn set_show_hidden(&mut self, show_hidden: bool) -> Result<()> {
        if self.show_hidden == show_hidden {
            return Ok(());
        }
        self.show_hidden = show_hidden;
        self.refresh()
    }

    /// 이름 목록으로 선택 교체, 커서는 첫 일치 항목으로
    pub fn select_files<S: AsRef<str>>(&mut self, names: &[S]) {
        let wanted: HashSet<&str> = names.iter().map(|n| n.as_ref()).collect();
        self.selection = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_parent_link() && wanted.contains(e.name.as_str()))
            .map(|(i, _)| i)
            .collect();
        if let Some(&first) = self.selection.iter().next() {
            self.cursor = first;
        }
        self.changes.push(PaneChange::SelectionChanged);
    }

    pub fn select_file(&mut self, name: &str) {
        self.select_files(&[name]);
    }

    /// 인덱스 집합으로 선택 교체 (범위 밖, ".."은 무시)
    pub fn select_indices(&mut self, indices: &BTreeSet<usize>) {
        self.selection = indices
            .iter()
            .copied()
            .filter(|&i| self.is_selectable(i))
            .collect();
        self.changes.push(PaneChange::SelectionChanged);
    }

    /// 커서 항목 마킹 토글 후 커서를 한 칸 아래로
    pub fn toggle_selection_at_cursor(&mut self) {
        if self.is_selectable(self.cursor) {
            if !self.selection.remove(&self.cursor) {
                self.selection.insert(self.cursor);
            }
            self.changes.push(PaneChange::SelectionChanged);
        }
        self.move_cursor_down();
    }

    pub fn select_all(&mut self) {
        self.selection = (0..self.items.len())
            .filter(|&i| self.is_selectable(i))
            .collect();
        self.changes.push(PaneChange::SelectionChanged);
    }

    pub fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        self.changes.push(PaneChange::SelectionChanged);
    }

    pub fn invert_selection(&mut self) {
        self.selection = (0..self.items.len())
            .filter(|&i| self.is_selectable(i) && !self.selection.contains(&i))
            .collect();
        self.changes.push(PaneChange::SelectionChanged);
    }

    /// 정렬 변경 (커서와 선택은 같은 항목에 유지)
    pub fn set_sort_descriptor(&mut self, sort: SortDescriptor) {
        let selected_names = self.selected_names();
        let cursor_name = self.focused().map(|e| e.name.clone());

        self.sort = sort;
        sort_items(&mut self.items, sort);
        self.resolve_selection(&selected_names);
        if let Some(index) = cursor_name.and_then(|name| self.index_of(&name)) {
            self.cursor = index;
        }
        self.changes.push(PaneChange::SortChanged(sort));
    }

    /// 작업 대상 항목
    ///
    /// 마킹된 항목이 있으면 그것들, 없으면 커서 항목 (".."은 제외).
    pub fn selected_files(&self) -> Vec<FileEntry> {
        if self.selection.is_empty() {
            return self
                .focused()
                .filter(|e| !e.is_parent_link())
                .cloned()
                .into_iter()
                .collect();
        }
        self.selection
            .iter()
            .filter_map(|&i| self.items.get(i))
            .cloned()
            .collect()
    }

    /// 커서 위치 항목
    pub fn focused(&self) -> Option<&FileEntry> {
        self.items.get(self.cursor)
    }

    /// 이름으로 커서 이동 (선택은 건드리지 않음)
    pub fn focus_name(&mut self, name: &str) -> bool {
        match self.index_of(name) {
            Some(index) => {
                self.cursor = index;
                true
            }
            None => false,
        }
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor + 1 < self.items.len() {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_page_up(&mut self, page_size: usize) {
        self.cursor = self.cursor.saturating_sub(page_size.max(1));
    }

    pub fn move_cursor_page_down(&mut self, page_size: usize) {
        self.cursor = (self.cursor + page_size.max(1)).min(self.last_index());
    }

    pub fn move_cursor_top(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_bottom(&mut self) {
        self.cursor = self.last_index();
    }

    /// 커서가 보이도록 스크롤 위치 조정
    pub fn adjust_scroll(&mut self, visible_rows: usize) {
        let visible_rows = visible_rows.max(1);
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + visible_rows {
            self.scroll_offset = self.cursor + 1 - visible_rows;
        }
        let max_offset = self.items.len().saturating_sub(visible_rows);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    /// 루트의 상위 디렉토리
    pub fn parent_root(&self) -> Option<PathBuf> {
        self.root.parent().map(Path::to_path_buf)
    }

    /// 쌓인 변경 알림 꺼내기
    pub fn drain_changes(&mut self) -> Vec<PaneChange> {
        mem::take(&mut self.changes)
    }

    /// 파일/디렉토리 개수 (".." 제외)
    pub fn counts(&self) -> (usize, usize) {
        let dirs = self
            .items
            .iter()
            .filter(|e| !e.is_parent_link() && e.is_directory())
            .count();
        let entries = self.items.iter().filter(|e| !e.is_parent_link()).count();
        (entries - dirs, dirs)
    }

    /// 마킹된 파일들의 크기 합계
    pub fn selected_size(&self) -> u64 {
        self.selection
            .iter()
            .filter_map(|&i| self.items.get(i))
            .map(|e| e.size)
            .sum()
    }

    fn scan(&self, root: &Path) -> Result<Vec<FileEntry>> {
        let mut entries = self.filesystem.read_directory(root)?;
        if !self.show_hidden {
            entries.retain(|e| !e.is_hidden);
        }
        sort_items(&mut entries, self.sort);

        let mut items = Vec::with_capacity(entries.len() + 1);
        items.extend(FileEntry::parent_link(root));
        items.extend(entries);
        Ok(items)
    }

    fn selected_names(&self) -> Vec<String> {
        self.selection
            .iter()
            .filter_map(|&i| self.items.get(i))
            .map(|e| e.name.clone())
            .collect()
    }

    fn resolve_selection(&mut self, names: &[String]) {
        let names: HashSet<&str> = names.iter().map(String::as_str).collect();
        self.selection = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_parent_link() && names.contains(e.name.as_str()))
            .map(|(i, _)| i)
            .collect();
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|e| e.name == name)
    }

    fn is_selectable(&self, index: usize) -> bool {
        self.items
            .get(index)
            .is_some_and(|e| !e.is_parent_link())
    }

    fn last_index(&self) -> usize {
        self.items.len().saturating_sub(1)
    }
}

/// 정렬 (".."은 방향과 무관하게 항상 맨 앞)
fn sort_items(items: &mut [FileEntry], sort: SortDescriptor) {
    items.sort_by(|a, b| {
        match (a.is_parent_link(), b.is_parent_link()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
        compare_entries(a, b, sort)
    });
}

fn compare_entries(a: &FileEntry, b: &FileEntry, sort: SortDescriptor) -> Ordering {
    // Type 외 기준은 디렉토리 그룹이 먼저 (방향과 무관)
    if sort.key != SortKey::Type {
        let group = b.is_directory().cmp(&a.is_directory());
        if group != Ordering::Equal {
            return group;
        }
    }

    let primary = match sort.key {
        SortKey::Type => a.file_type.rank().cmp(&b.file_type.rank()),
        SortKey::Name => Ordering::Equal,
        SortKey::Size => a.size.cmp(&b.size),
        SortKey::Modified => a.modified.cmp(&b.modified),
        SortKey::Extension => a.extension().cmp(&b.extension()),
    };

    let ordering = primary
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name));

    if sort.ascending {
        ordering
    } else {
        ordering.reverse()
    }
}
