use crate::utils::error::{RafError, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::info;

/// OS 기본 프로그램 실행 명령 (프로그램, 인자)
pub fn opener_command(path: &Path) -> (&'static str, Vec<String>) {
    let target = path.to_string_lossy().to_string();

    if cfg!(target_os = "macos") {
        ("open", vec![target])
    } else if cfg!(windows) {
        // start의 첫 인자는 창 제목
        ("cmd", vec!["/C".into(), "start".into(), String::new(), target])
    } else {
        ("xdg-open", vec![target])
    }
}

/// 파일을 기본 프로그램으로 열기
///
/// 디렉토리를 넘기면 OS 파일 탐색기에서 보여준다.
pub fn open_with_default_app(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(RafError::PathNotFound {
            path: path.to_path_buf(),
        });
    }

    let (program, args) = opener_command(path);
    // 터미널 화면을 깨뜨리지 않도록 출력은 버린다
    let status = Command::new(program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| RafError::ExternalOpenFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if status.success() {
        info!(path = %path.display(), program, "opened externally");
        Ok(())
    } else {
        Err(RafError::ExternalOpenFailed {
            path: path.to_path_buf(),
            reason: format!("{} exited with status {}", program, status),
        })
    }
}
