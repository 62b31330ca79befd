use super::*;
use crate::system::opener;
use crate::utils::error::RafError;
use crate::utils::formatter::{format_file_size, pluralize};
use std::fs::File;
use std::io::Read;

/// 에러 다이얼로그에 나열하는 최대 실패 항목 수
const MAX_FAILURE_LINES: usize = 10;

impl App {
    /// 다이얼로그 활성 상태 확인
    pub fn is_dialog_active(&self) -> bool {
        self.dialog.is_some()
    }

    /// 다이얼로그 닫기 (대기 작업도 취소)
    pub fn close_dialog(&mut self) {
        if let Some(pending) = self.pending_operation.take() {
            debug!(operation = pending.operation_type.name(), "pending operation cancelled");
        }
        self.dialog = None;
    }

    /// 작업 대상 경로 (마킹 항목, 없으면 커서 항목)
    pub(super) fn operation_sources(&self) -> Vec<PathBuf> {
        self.active_pane()
            .selected_files()
            .into_iter()
            .map(|entry| entry.path)
            .collect()
    }

    // === 복사 / 이동 ===

    /// 반대쪽 패널로 복사(F5) 또는 이동(F6) 시작
    pub fn start_transfer(&mut self, operation_type: OperationType) {
        let sources = self.operation_sources();
        if sources.is_empty() {
            self.set_toast("No files selected");
            return;
        }

        let dest_dir = self.other_pane().root().to_path_buf();
        if FileSystem::is_same_directory(&dest_dir, self.active_path()) {
            self.dialog = Some(DialogKind::error(
                "Error",
                Self::format_user_error(
                    operation_type.name(),
                    Some(&dest_dir),
                    "Source and destination are the same directory.",
                    "Open a different directory in the other pane.",
                ),
            ));
            return;
        }

        let pending = PendingOperation::transfer(operation_type, sources, dest_dir);
        if let Some(src) = pending.sources.iter().find(|src| {
            pending
                .destination_for(src)
                .is_some_and(|dest| FileSystem::is_recursive_path(src, &dest))
        }) {
            self.dialog = Some(DialogKind::error(
                "Error",
                Self::format_user_error(
                    operation_type.name(),
                    Some(src),
                    "Cannot copy or move a directory into itself.",
                    "Choose a destination outside the source directory.",
                ),
            ));
            return;
        }

        // 대상의 같은 이름이 소스 자신이거나 소스를 담은 디렉토리
        if let Some(src) = pending.sources.iter().find(|src| {
            pending
                .destination_for(src)
                .is_some_and(|dest| FileSystem::contains_source(&dest, src))
        }) {
            self.dialog = Some(DialogKind::error(
                "Error",
                Self::format_user_error(
                    operation_type.name(),
                    Some(src),
                    "The destination would replace the source or a directory containing it.",
                    "Choose a destination outside the source's parent directories.",
                ),
            ));
            return;
        }

        self.request_confirmation(pending);
    }

    // === 삭제 ===

    /// 삭제 시작 (F8 / Delete / Backspace)
    pub fn start_delete(&mut self) {
        let sources = self.operation_sources();
        if sources.is_empty() {
            self.set_toast("No files selected");
            return;
        }
        self.request_confirmation(PendingOperation::delete(sources));
    }

    /// 확인 다이얼로그를 띄우거나 (설정에 따라) 바로 진행
    fn request_confirmation(&mut self, pending: PendingOperation) {
        if !self.settings.confirm_operations {
            self.pending_operation = Some(pending);
            self.proceed_pending_operation();
            return;
        }

        let title = pending.operation_type.name();
        let message = self.confirmation_message(&pending);
        self.pending_operation = Some(pending);
        self.dialog = Some(DialogKind::confirm(title, message));
    }

    fn confirmation_message(&self, pending: &PendingOperation) -> String {
        let what = match pending.sources.as_slice() {
            [single] => format!(
                "'{}'",
                single
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| single.display().to_string())
            ),
            many => pluralize(many.len(), "item", "items"),
        };

        match (pending.operation_type, &pending.dest_dir) {
            (OperationType::Delete, _) if self.settings.delete_to_trash => {
                format!("Move {} to the trash?", what)
            }
            (OperationType::Delete, _) => {
                format!("Permanently delete {}?\nThis cannot be undone.", what)
            }
            (op, Some(dest)) => format!("{} {} to\n{}?", op.name(), what, dest.display()),
            (op, None) => format!("{} {}?", op.name(), what),
        }
    }

    /// 확인 다이얼로그에서 OK
    pub fn accept_confirmation(&mut self) {
        self.dialog = None;
        self.proceed_pending_operation();
    }

    /// 충돌 검사 후 실행
    ///
    /// 대상에 같은 이름이 있으면 충돌 다이얼로그로 정책을 묻는다.
    fn proceed_pending_operation(&mut self) {
        let Some(pending) = self.pending_operation.take() else {
            return;
        };

        if pending.operation_type.needs_destination()
            && pending.conflict_policy == ConflictPolicy::Ask
        {
            let conflicts = pending.conflicting_names();
            if !conflicts.is_empty() {
                debug!(count = conflicts.len(), "name conflicts in destination");
                self.pending_operation = Some(pending);
                self.dialog = Some(DialogKind::conflict(conflicts));
                return;
            }
        }

        self.run_operation(pending);
    }

    /// 충돌 다이얼로그 선택 처리 (0: 모두 덮어쓰기, 1: 건너뛰기, 그 외: 취소)
    pub fn resolve_conflict(&mut self, option: usize) {
        let policy = match option {
            0 => ConflictPolicy::OverwriteAll,
            1 => ConflictPolicy::SkipExisting,
            _ => {
                self.close_dialog();
                self.set_toast("Cancelled");
                return;
            }
        };

        self.dialog = None;
        if let Some(mut pending) = self.pending_operation.take() {
            pending.conflict_policy = policy;
            self.run_operation(pending);
        }
    }

    /// 작업 실행 후 두 패널 새로고침과 결과 보고
    pub(super) fn run_operation(&mut self, pending: PendingOperation) {
        info!(
            operation = pending.operation_type.name(),
            count = pending.sources.len(),
            dest = ?pending.dest_dir,
            "operation started"
        );

        let report = self.execute_operation(&pending);
        self.refresh_both_panels();

        if pending.operation_type == OperationType::Copy {
            self.active_pane_mut().clear_selection();
        }
        if pending.operation_type.needs_destination() && !report.completed.is_empty() {
            self.other_pane_mut().select_files(&report.completed);
        }

        self.finish_operation(report);
    }

    /// 소스별로 실행 (실패해도 계속)
    pub(super) fn execute_operation(&self, pending: &PendingOperation) -> OperationReport {
        let mut report = OperationReport::new(pending.operation_type);

        for src in &pending.sources {
            let name = src
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| src.display().to_string());

            let result = match pending.operation_type {
                OperationType::Delete => self.delete_one(src),
                OperationType::Copy | OperationType::Move => {
                    let Some(dest) = pending.destination_for(src) else {
                        report.record_failure(src.clone(), "invalid source name");
                        continue;
                    };
                    if FileSystem::contains_source(&dest, src) {
                        let e = RafError::SameSourceAndDest { path: dest };
                        warn!(src = %src.display(), error = %e, "refusing to replace source");
                        report.record_failure(src.clone(), e.to_string());
                        continue;
                    }
                    if dest.symlink_metadata().is_ok() {
                        if pending.conflict_policy == ConflictPolicy::SkipExisting {
                            debug!(name = %name, "skipped existing");
                            report.record_skip(name);
                            continue;
                        }
                        // 덮어쓰기: 기존 항목을 먼저 지운다 (파일 <-> 디렉토리 교체 포함)
                        if let Err(e) = self.filesystem.delete_permanently(&dest) {
                            warn!(dest = %dest.display(), error = %e, "cannot replace existing");
                            report.record_failure(src.clone(), e.to_string());
                            continue;
                        }
                    }
                    if pending.operation_type == OperationType::Copy {
                        self.filesystem.copy_path(src, &dest)
                    } else {
                        self.filesystem.move_path(src, &dest)
                    }
                }
            };

            match result {
                Ok(bytes) => report.record_success(name, bytes),
                Err(e) => {
                    warn!(src = %src.display(), error = %e, "operation item failed");
                    report.record_failure(src.clone(), e.to_string());
                }
            }
        }

        report
    }

    /// 설정에 따라 휴지통 또는 영구 삭제
    fn delete_one(&self, path: &Path) -> Result<u64> {
        if self.settings.delete_to_trash {
            self.filesystem.move_to_trash(path).map(|()| 0)
        } else {
            self.filesystem.delete_permanently(path)
        }
    }

    /// 결과 보고: 실패가 있으면 에러 다이얼로그, 없으면 토스트
    fn finish_operation(&mut self, report: OperationReport) {
        let summary = report.summary();
        info!(
            summary = %summary,
            bytes = report.bytes,
            "operation finished"
        );

        if !report.has_failures() {
            let toast = if report.bytes > 0 {
                format!("{} ({})", summary, format_file_size(report.bytes))
            } else {
                summary
            };
            self.set_toast(&toast);
            return;
        }

        let lines = report.failure_lines();
        let mut message = summary;
        message.push('\n');
        for line in lines.iter().take(MAX_FAILURE_LINES) {
            message.push('\n');
            message.push_str(line);
        }
        if lines.len() > MAX_FAILURE_LINES {
            message.push_str(&format!(
                "\n... and {} more",
                lines.len() - MAX_FAILURE_LINES
            ));
        }
        self.dialog = Some(DialogKind::error(
            format!("{} Errors", report.operation_type.name()),
            message,
        ));
    }

    // === 새 디렉토리 / 이름 변경 ===

    /// 새 디렉토리 입력 다이얼로그 (F7)
    pub fn start_mkdir(&mut self) {
        self.dialog = Some(DialogKind::mkdir_input());
    }

    /// 이름 변경 입력 다이얼로그 (F2)
    pub fn start_rename(&mut self) {
        let Some(entry) = self.active_pane().focused() else {
            return;
        };
        if entry.is_parent_link() {
            self.set_toast("Cannot rename '..'");
            return;
        }
        self.dialog = Some(DialogKind::rename_input(entry.path.clone(), entry.name.clone()));
    }

    /// 입력 다이얼로그 OK
    pub fn confirm_input(&mut self, value: String, purpose: InputPurpose) {
        match purpose {
            InputPurpose::MakeDirectory => self.confirm_mkdir(value),
            InputPurpose::Rename { original } => self.confirm_rename(value, original),
        }
    }

    /// 새 디렉토리 생성 후 선택
    pub fn confirm_mkdir(&mut self, dir_name: String) {
        let dir_name = dir_name.trim().to_string();
        let new_path = self.filesystem.child_path(self.active_path(), &dir_name);

        let result = self
            .filesystem
            .validate_name(&dir_name)
            .and_then(|()| self.filesystem.create_directory(&new_path));

        match result {
            Ok(()) => {
                info!(path = %new_path.display(), "directory created");
                self.dialog = None;
                self.refresh_both_panels();
                self.active_pane_mut().select_file(&dir_name);
                self.set_toast(&format!("Directory '{}' created", dir_name));
            }
            Err(e) => {
                warn!(path = %new_path.display(), error = %e, "create directory failed");
                self.dialog = Some(DialogKind::error(
                    "Error",
                    Self::format_user_error(
                        "Create directory",
                        Some(&new_path),
                        &e.to_string(),
                        "Use a valid name and check write permission.",
                    ),
                ));
            }
        }
    }

    /// 이름 변경 후 새 이름으로 선택
    pub fn confirm_rename(&mut self, new_name: String, original_path: PathBuf) {
        let new_name = new_name.trim().to_string();
        let parent = original_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.active_path().to_path_buf());
        let new_path = self.filesystem.child_path(&parent, &new_name);

        if new_path == original_path {
            self.dialog = None;
            return;
        }

        let result = self
            .filesystem
            .validate_name(&new_name)
            .and_then(|()| self.filesystem.rename_path(&original_path, &new_path));

        match result {
            Ok(()) => {
                info!(
                    from = %original_path.display(),
                    to = %new_path.display(),
                    "renamed"
                );
                self.dialog = None;
                self.refresh_both_panels();
                self.active_pane_mut().select_file(&new_name);
                self.set_toast("Rename completed");
            }
            Err(e) => {
                warn!(path = %original_path.display(), error = %e, "rename failed");
                self.dialog = Some(DialogKind::error(
                    "Error",
                    Self::format_user_error(
                        "Rename",
                        Some(&original_path),
                        &e.to_string(),
                        "Check duplicate names and write permission.",
                    ),
                ));
            }
        }
    }

    // === 외부 열기 / 뷰어 ===

    /// Shift+Enter: 커서 항목을 OS 기본 프로그램으로 (디렉토리는 파일 탐색기)
    pub fn open_focused_externally(&mut self) {
        if let Some(path) = self.active_pane().focused().map(|e| e.path.clone()) {
            self.open_externally(&path);
        }
    }

    pub(super) fn open_externally(&mut self, path: &Path) {
        match opener::open_with_default_app(path) {
            Ok(()) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                self.set_toast(&format!("Opened {}", name));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "external open failed");
                self.dialog = Some(DialogKind::error(
                    "Error",
                    Self::format_user_error(
                        "Open",
                        Some(path),
                        &e.to_string(),
                        "Check that a default application is configured.",
                    ),
                ));
            }
        }
    }

    /// F3: 커서 파일을 읽기 전용 뷰어로 (디렉토리는 무시)
    pub fn view_focused_file(&mut self) {
        let Some(entry) = self.active_pane().focused().cloned() else {
            return;
        };
        if entry.is_parent_link() || !entry.path.is_file() {
            return;
        }

        match read_head(&entry.path, self.settings.viewer_max_bytes) {
            Ok((text, truncated)) => {
                debug!(path = %entry.path.display(), truncated, "viewer opened");
                self.dialog = Some(DialogKind::viewer(entry.name, &text, truncated));
            }
            Err(e) => {
                warn!(path = %entry.path.display(), error = %e, "cannot read file");
                self.dialog = Some(DialogKind::error(
                    "Error",
                    Self::format_user_error(
                        "View file",
                        Some(&entry.path),
                        &e.to_string(),
                        "Check read permission.",
                    ),
                ));
            }
        }
    }
}

/// 파일 앞부분 `max_bytes`를 손실 UTF-8로 읽기
///
/// 반환: (텍스트, 잘렸는지)
fn read_head(path: &Path, max_bytes: u64) -> Result<(String, bool)> {
    let file = File::open(path)?;
    let total = file.metadata()?.len();
    let mut buf = Vec::new();
    file.take(max_bytes).read_to_end(&mut buf)?;
    Ok((String::from_utf8_lossy(&buf).into_owned(), total > max_bytes))
}
