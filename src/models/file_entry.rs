use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// 상위 디렉토리 항목 이름
pub const PARENT_NAME: &str = "..";

/// 파일 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// 상위 디렉토리 링크 ("..")
    ParentLink,
    /// 디렉토리
    Directory,
    /// 심볼릭 링크
    Symlink,
    /// 실행 파일
    Executable,
    /// 일반 파일
    File,
}

impl FileType {
    /// Type 컬럼 정렬 순위 (작을수록 앞)
    pub fn rank(self) -> u8 {
        match self {
            FileType::ParentLink => 0,
            FileType::Directory => 1,
            FileType::Symlink => 2,
            FileType::Executable => 3,
            FileType::File => 4,
        }
    }
}

/// 디렉토리 스캔 시점의 파일 엔트리 스냅샷
///
/// 스캔할 때마다 새로 만들어지며 이후 변경되지 않는다.
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    /// 파일/디렉토리 이름
    pub name: String,
    /// 전체 경로
    pub path: PathBuf,
    /// 파일 타입
    pub file_type: FileType,
    /// 바이트 단위 크기 (디렉토리는 0)
    pub size: u64,
    /// 수정 시간 (읽을 수 없으면 None)
    pub modified: Option<SystemTime>,
    /// 숨김 파일 여부
    pub is_hidden: bool,
    /// 탐색 가능한 디렉토리인지 (링크는 스캔 시점의 대상 기준)
    pub is_dir: bool,
}

impl FileEntry {
    pub fn new(
        name: impl Into<String>,
        path: PathBuf,
        file_type: FileType,
        size: u64,
        modified: Option<SystemTime>,
    ) -> Self {
        let name = name.into();
        let is_hidden = name.starts_with('.') && name != PARENT_NAME;
        let is_dir = matches!(file_type, FileType::Directory | FileType::ParentLink);
        Self {
            name,
            path,
            file_type,
            size,
            modified,
            is_hidden,
            is_dir,
        }
    }

    /// 심볼릭 링크 대상이 디렉토리인지 기록
    pub fn with_link_target_dir(mut self, target_is_dir: bool) -> Self {
        if self.file_type == FileType::Symlink {
            self.is_dir = target_is_dir;
        }
        self
    }

    /// `root`의 상위 디렉토리를 가리키는 ".." 항목
    ///
    /// root가 최상위라면 None.
    pub fn parent_link(root: &Path) -> Option<Self> {
        let parent = root.parent()?;
        Some(Self::new(
            PARENT_NAME,
            parent.to_path_buf(),
            FileType::ParentLink,
            0,
            None,
        ))
    }

    /// ".." 항목 여부
    pub fn is_parent_link(&self) -> bool {
        self.file_type == FileType::ParentLink
    }

    /// 탐색 가능한 디렉토리 여부 (".." 포함)
    ///
    /// 디렉토리를 가리키는 심볼릭 링크도 디렉토리로 본다.
    pub fn is_directory(&self) -> bool {
        self.is_dir
    }

    /// 일반 파일 여부
    pub fn is_file(&self) -> bool {
        matches!(self.file_type, FileType::File | FileType::Executable)
    }

    /// 소문자 확장자 (없으면 빈 문자열)
    pub fn extension(&self) -> String {
        if self.is_directory() {
            return String::new();
        }
        Path::new(&self.name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }
}
