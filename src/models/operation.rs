//! 파일 작업 모델
//!
//! 복사/이동/삭제 요청과 결과 보고서

use std::path::{Path, PathBuf};

/// 작업 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    /// 복사
    Copy,
    /// 이동
    Move,
    /// 삭제
    Delete,
}

impl OperationType {
    /// 작업 유형 이름 반환
    pub fn name(&self) -> &'static str {
        match self {
            OperationType::Copy => "Copy",
            OperationType::Move => "Move",
            OperationType::Delete => "Delete",
        }
    }

    /// 과거형 ("Copied 3 items")
    pub fn past_tense(&self) -> &'static str {
        match self {
            OperationType::Copy => "Copied",
            OperationType::Move => "Moved",
            OperationType::Delete => "Deleted",
        }
    }

    /// 대상 디렉토리가 필요한 작업인지
    pub fn needs_destination(&self) -> bool {
        !matches!(self, OperationType::Delete)
    }
}

/// 이름 충돌 처리 방법
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// 충돌 없음 (또는 아직 묻지 않음)
    Ask,
    /// 모두 덮어쓰기
    OverwriteAll,
    /// 이미 있는 항목은 건너뛰기
    SkipExisting,
}

/// 확인 대기 중인 작업
#[derive(Debug, Clone, PartialEq)]
pub struct PendingOperation {
    /// 작업 유형
    pub operation_type: OperationType,
    /// 소스 파일/디렉토리 목록
    pub sources: Vec<PathBuf>,
    /// 대상 디렉토리 (삭제는 None)
    pub dest_dir: Option<PathBuf>,
    /// 충돌 처리 방법
    pub conflict_policy: ConflictPolicy,
}

impl PendingOperation {
    pub fn transfer(operation_type: OperationType, sources: Vec<PathBuf>, dest_dir: PathBuf) -> Self {
        Self {
            operation_type,
            sources,
            dest_dir: Some(dest_dir),
            conflict_policy: ConflictPolicy::Ask,
        }
    }

    pub fn delete(sources: Vec<PathBuf>) -> Self {
        Self {
            operation_type: OperationType::Delete,
            sources,
            dest_dir: None,
            conflict_policy: ConflictPolicy::Ask,
        }
    }

    /// 소스 경로에 대응하는 대상 경로
    pub fn destination_for(&self, source: &Path) -> Option<PathBuf> {
        let dest_dir = self.dest_dir.as_ref()?;
        let name = source.file_name()?;
        Some(dest_dir.join(name))
    }

    /// 대상에 이미 존재하는 소스 이름 목록
    pub fn conflicting_names(&self) -> Vec<String> {
        self.sources
            .iter()
            .filter(|src| {
                self.destination_for(src)
                    .is_some_and(|dest| dest.symlink_metadata().is_ok())
            })
            .filter_map(|src| src.file_name().map(|n| n.to_string_lossy().to_string()))
            .collect()
    }
}

/// 작업 실패 항목
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// 작업 결과 보고서
///
/// 개별 실패는 배치를 중단하지 않고 여기에 모인다.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationReport {
    pub operation_type: OperationType,
    /// 완료된 항목 이름
    pub completed: Vec<String>,
    /// 건너뛴 항목 이름
    pub skipped: Vec<String>,
    pub failed: Vec<OperationFailure>,
    /// 처리한 바이트 수
    pub bytes: u64,
}

impl OperationReport {
    pub fn new(operation_type: OperationType) -> Self {
        Self {
            operation_type,
            completed: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
            bytes: 0,
        }
    }

    pub fn record_success(&mut self, name: impl Into<String>, bytes: u64) {
        self.completed.push(name.into());
        self.bytes += bytes;
    }

    pub fn record_skip(&mut self, name: impl Into<String>) {
        self.skipped.push(name.into());
    }

    pub fn record_failure(&mut self, path: PathBuf, reason: impl Into<String>) {
        self.failed.push(OperationFailure {
            path,
            reason: reason.into(),
        });
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// 상태바용 한 줄 요약
    pub fn summary(&self) -> String {
        let mut text = format!(
            "{} {}",
            self.operation_type.past_tense(),
            crate::utils::formatter::pluralize(self.completed.len(), "item", "items")
        );
        if !self.skipped.is_empty() {
            text.push_str(&format!(", skipped {}", self.skipped.len()));
        }
        if !self.failed.is_empty() {
            text.push_str(&format!(", failed {}", self.failed.len()));
        }
        text
    }

    /// 에러 다이얼로그 본문 (실패 항목별 한 줄)
    pub fn failure_lines(&self) -> Vec<String> {
        self.failed
            .iter()
            .map(|f| {
                let name = f
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| f.path.display().to_string());
                format!("{}: {}", name, f.reason)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_operation_type_name() {
        assert_eq!(OperationType::Copy.name(), "Copy");
        assert_eq!(OperationType::Move.past_tense(), "Moved");
        assert!(!OperationType::Delete.needs_destination());
    }

    #[test]
    fn test_destination_for() {
        let op = PendingOperation::transfer(
            OperationType::Copy,
            vec![PathBuf::from("/src/a.txt")],
            PathBuf::from("/dest"),
        );
        assert_eq!(
            op.destination_for(Path::new("/src/a.txt")),
            Some(PathBuf::from("/dest/a.txt"))
        );

        let delete = PendingOperation::delete(vec![PathBuf::from("/src/a.txt")]);
        assert_eq!(delete.destination_for(Path::new("/src/a.txt")), None);
    }

    #[test]
    fn test_conflicting_names() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dest = temp.path().join("dest");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::create_dir_all(&dest).unwrap();
        std::fs::write(src.join("same.txt"), "1").unwrap();
        std::fs::write(src.join("new.txt"), "2").unwrap();
        std::fs::write(dest.join("same.txt"), "old").unwrap();

        let op = PendingOperation::transfer(
            OperationType::Move,
            vec![src.join("same.txt"), src.join("new.txt")],
            dest,
        );
        assert_eq!(op.conflicting_names(), vec!["same.txt".to_string()]);
    }

    #[test]
    fn test_report_summary() {
        let mut report = OperationReport::new(OperationType::Copy);
        report.record_success("a", 10);
        report.record_success("b", 5);
        report.record_skip("c");
        report.record_failure(PathBuf::from("/x/d"), "Permission denied");

        assert_eq!(report.bytes, 15);
        assert!(report.has_failures());
        assert_eq!(report.summary(), "Copied 2 items, skipped 1, failed 1");
        assert_eq!(report.failure_lines(), vec!["d: Permission denied".to_string()]);
    }
}
