use crate::models::file_entry::{FileEntry, FileType};
use crate::utils::error::{RafError, Result};
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 파일 시스템 모듈
///
/// 모든 호출은 동기식이며 재시도하지 않는다.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystem;

impl FileSystem {
    pub fn new() -> Self {
        Self
    }

    /// 디렉토리 읽기
    ///
    /// 읽을 수 없는 개별 엔트리는 건너뛴다. 결과 순서는 정렬되지 않는다.
    pub fn read_directory(&self, path: &Path) -> Result<Vec<FileEntry>> {
        if !path.exists() {
            return Err(RafError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_dir() {
            return Err(RafError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        let read_dir = fs::read_dir(path).map_err(|e| map_io_error(e, path))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let Ok(entry) = entry else { continue };
            let entry_path = entry.path();

            let Ok(link_metadata) = fs::symlink_metadata(&entry_path) else {
                continue;
            };

            let name = entry.file_name().to_string_lossy().to_string();
            let file_type = Self::file_type_of(&link_metadata);

            // symlink는 대상 메타데이터로 크기/시간 표시
            let display_metadata = if file_type == FileType::Symlink {
                fs::metadata(&entry_path).unwrap_or(link_metadata)
            } else {
                link_metadata
            };

            let size = if display_metadata.is_dir() {
                0
            } else {
                display_metadata.len()
            };
            let modified = display_metadata.modified().ok();
            let target_is_dir = display_metadata.is_dir();

            entries.push(
                FileEntry::new(name, entry_path, file_type, size, modified)
                    .with_link_target_dir(target_is_dir),
            );
        }

        debug!(path = %path.display(), count = entries.len(), "directory scanned");
        Ok(entries)
    }

    fn file_type_of(metadata: &Metadata) -> FileType {
        if metadata.is_dir() {
            return FileType::Directory;
        }
        if metadata.file_type().is_symlink() {
            return FileType::Symlink;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if metadata.permissions().mode() & 0o111 != 0 {
                return FileType::Executable;
            }
        }

        FileType::File
    }

    /// 부모 경로 + 자식 이름
    pub fn child_path(&self, parent: &Path, name: &str) -> PathBuf {
        parent.join(name)
    }

    /// 새 이름 검증 (빈 이름, 경로 구분자, "."/".." 거부)
    pub fn validate_name(&self, name: &str) -> Result<()> {
        let reason = if name.trim().is_empty() {
            Some("name cannot be empty")
        } else if name == "." || name == ".." {
            Some("reserved name")
        } else if name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) {
            Some("name cannot contain a path separator")
        } else if name.contains('\0') {
            Some("name cannot contain NUL")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(RafError::InvalidName {
                name: name.to_string(),
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// 새 디렉토리 생성
    pub fn create_directory(&self, path: &Path) -> Result<()> {
        if path.symlink_metadata().is_ok() {
            return Err(RafError::FileExists {
                path: path.to_path_buf(),
            });
        }
        fs::create_dir(path).map_err(|e| map_io_error(e, path))
    }

    /// 파일/디렉토리 이름 변경
    pub fn rename_path(&self, src: &Path, dest: &Path) -> Result<()> {
        if src.symlink_metadata().is_err() {
            return Err(RafError::PathNotFound {
                path: src.to_path_buf(),
            });
        }
        if src == dest {
            return Ok(());
        }
        // 대소문자만 바뀌는 경우(case-insensitive FS)는 같은 파일이므로 허용
        let case_only = src
            .to_string_lossy()
            .eq_ignore_ascii_case(&dest.to_string_lossy());
        if dest.symlink_metadata().is_ok() && !case_only {
            return Err(RafError::FileExists {
                path: dest.to_path_buf(),
            });
        }

        fs::rename(src, dest).map_err(|e| {
            if e.kind() == io::ErrorKind::PermissionDenied {
                RafError::PermissionDenied {
                    path: src.to_path_buf(),
                }
            } else {
                RafError::RenameFailed {
                    src: src.to_path_buf(),
                    dest: dest.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        })
    }

    /// 파일 또는 디렉토리 복사 (디렉토리는 재귀)
    ///
    /// 반환값: 복사된 바이트 수
    pub fn copy_path(&self, src: &Path, dest: &Path) -> Result<u64> {
        if src == dest {
            return Err(RafError::SameSourceAndDest {
                path: src.to_path_buf(),
            });
        }
        let metadata = fs::symlink_metadata(src).map_err(|_| RafError::PathNotFound {
            path: src.to_path_buf(),
        })?;

        if metadata.is_dir() {
            if Self::is_recursive_path(src, dest) {
                return Err(RafError::RecursiveOperation {
                    src: src.to_path_buf(),
                    dest: dest.to_path_buf(),
                });
            }
            self.copy_directory(src, dest)
        } else if metadata.file_type().is_symlink() {
            self.copy_symlink(src, dest)
        } else {
            self.copy_file(src, dest)
        }
    }

    fn copy_file(&self, src: &Path, dest: &Path) -> Result<u64> {
        fs::copy(src, dest).map_err(|e| {
            if e.kind() == io::ErrorKind::PermissionDenied {
                RafError::PermissionDenied {
                    path: dest.to_path_buf(),
                }
            } else {
                RafError::CopyFailed {
                    src: src.to_path_buf(),
                    dest: dest.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        })
    }

    fn copy_directory(&self, src: &Path, dest: &Path) -> Result<u64> {
        fs::create_dir_all(dest).map_err(|e| map_io_error(e, dest))?;

        let mut total_bytes = 0u64;
        for entry in fs::read_dir(src).map_err(|e| map_io_error(e, src))? {
            let entry = entry?;
            let entry_path = entry.path();
            let dest_path = dest.join(entry.file_name());
            let metadata = fs::symlink_metadata(&entry_path)?;

            total_bytes += if metadata.is_dir() {
                self.copy_directory(&entry_path, &dest_path)?
            } else if metadata.file_type().is_symlink() {
                self.copy_symlink(&entry_path, &dest_path)?
            } else {
                self.copy_file(&entry_path, &dest_path)?
            };
        }

        Ok(total_bytes)
    }

    /// 심볼릭 링크는 대상이 아니라 링크 자체를 복사한다 (unix).
    fn copy_symlink(&self, src: &Path, dest: &Path) -> Result<u64> {
        #[cfg(unix)]
        {
            let target = fs::read_link(src)?;
            if dest.symlink_metadata().is_ok() {
                fs::remove_file(dest).map_err(|e| map_io_error(e, dest))?;
            }
            std::os::unix::fs::symlink(&target, dest).map_err(|e| RafError::CopyFailed {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
                reason: e.to_string(),
            })?;
            Ok(0)
        }

        #[cfg(not(unix))]
        {
            self.copy_file(src, dest)
        }
    }

    /// 파일 또는 디렉토리 이동
    ///
    /// rename을 먼저 시도하고, 실패하면(다른 파일시스템 등) 복사 후 삭제한다.
    pub fn move_path(&self, src: &Path, dest: &Path) -> Result<u64> {
        if src == dest {
            return Err(RafError::SameSourceAndDest {
                path: src.to_path_buf(),
            });
        }
        let metadata = fs::symlink_metadata(src).map_err(|_| RafError::PathNotFound {
            path: src.to_path_buf(),
        })?;
        if metadata.is_dir() && Self::is_recursive_path(src, dest) {
            return Err(RafError::RecursiveOperation {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
            });
        }

        let size = if metadata.is_dir() {
            self.calculate_total_size(&[src.to_path_buf()])
                .map(|(bytes, _)| bytes)
                .unwrap_or(0)
        } else {
            metadata.len()
        };

        if fs::rename(src, dest).is_ok() {
            return Ok(size);
        }

        self.copy_path(src, dest)?;
        self.delete_permanently(src)
            .map_err(|e| RafError::MoveFailed {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
                reason: format!("Failed to remove source after copy: {}", e),
            })?;
        Ok(size)
    }

    /// 영구 삭제 (디렉토리는 재귀)
    ///
    /// 반환값: 삭제된 바이트 수
    pub fn delete_permanently(&self, path: &Path) -> Result<u64> {
        let metadata = fs::symlink_metadata(path).map_err(|_| RafError::PathNotFound {
            path: path.to_path_buf(),
        })?;

        let (size, result) = if metadata.is_dir() {
            let (bytes, _) = self.calculate_total_size(&[path.to_path_buf()])?;
            (bytes, fs::remove_dir_all(path))
        } else {
            (metadata.len(), fs::remove_file(path))
        };

        result.map_err(|e| {
            if e.kind() == io::ErrorKind::PermissionDenied {
                RafError::PermissionDenied {
                    path: path.to_path_buf(),
                }
            } else {
                RafError::DeleteFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        })?;

        Ok(size)
    }

    /// 휴지통으로 이동 (trash crate 래퍼)
    pub fn move_to_trash(&self, path: &Path) -> Result<()> {
        trash::delete(path).map_err(|e| RafError::DeleteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// 경로 목록의 총 크기와 파일 수 계산
    ///
    /// 반환값: (총 바이트, 총 파일 수). symlink는 따라가지 않는다.
    pub fn calculate_total_size(&self, paths: &[PathBuf]) -> Result<(u64, usize)> {
        let mut total_bytes = 0u64;
        let mut total_files = 0usize;

        for path in paths {
            let metadata = fs::symlink_metadata(path)?;
            if metadata.is_dir() {
                let children: Vec<PathBuf> = fs::read_dir(path)?
                    .filter_map(|entry| entry.ok().map(|e| e.path()))
                    .collect();
                let (bytes, files) = self.calculate_total_size(&children)?;
                total_bytes += bytes;
                total_files += files;
            } else {
                total_bytes += metadata.len();
                total_files += 1;
            }
        }

        Ok((total_bytes, total_files))
    }

    /// 디렉토리를 자기 자신 내부로 복사/이동하는지 검사
    pub fn is_recursive_path(source: &Path, dest: &Path) -> bool {
        if !source.is_dir() {
            return false;
        }
        let Ok(canonical_source) = source.canonicalize() else {
            return false;
        };
        // dest는 아직 없을 수 있으므로 부모 기준으로 정규화
        let canonical_dest = match dest.canonicalize() {
            Ok(p) => p,
            Err(_) => match (dest.parent(), dest.file_name()) {
                (Some(parent), Some(name)) => match parent.canonicalize() {
                    Ok(p) => p.join(name),
                    Err(_) => return false,
                },
                _ => return false,
            },
        };
        canonical_dest.starts_with(&canonical_source)
    }

    /// 두 디렉토리가 같은 곳인지 (심볼릭 링크와 ".."를 풀어서 비교)
    pub fn is_same_directory(a: &Path, b: &Path) -> bool {
        match (a.canonicalize(), b.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => a == b,
        }
    }

    /// `dest`를 지우면 `source`도 함께 사라지는지
    ///
    /// dest가 source 자신이거나 source를 담은 디렉토리일 때 true.
    /// dest가 링크면 링크 자체만 지워지므로 대상은 따라가지 않는다.
    pub fn contains_source(dest: &Path, source: &Path) -> bool {
        if dest.symlink_metadata().is_err() {
            return false;
        }
        match (canonical_location(dest), canonical_location(source)) {
            (Some(dest), Some(source)) => source.starts_with(dest),
            _ => false,
        }
    }
}

/// 마지막 구성요소는 따라가지 않는 정규화 경로
fn canonical_location(path: &Path) -> Option<PathBuf> {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => parent.canonicalize().ok().map(|p| p.join(name)),
        _ => path.canonicalize().ok(),
    }
}

fn map_io_error(e: io::Error, path: &Path) -> RafError {
    if e.kind() == io::ErrorKind::PermissionDenied {
        RafError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        RafError::Io(e)
    }
}
