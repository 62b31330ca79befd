use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// 로그 필터 환경 변수 (예: `RAFDIR_LOG=debug`)
pub const LOG_ENV: &str = "RAFDIR_LOG";
const LOG_FILE_PREFIX: &str = "rafdir.log";

/// 기본 로그 디렉토리 (`~/.rafdir/logs`)
pub fn default_log_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".rafdir").join("logs"))
}

/// tracing 초기화
///
/// 터미널은 TUI가 차지하므로 로그는 일 단위로 회전하는 파일에만 쓴다.
/// 반환된 guard가 drop되면 남은 로그가 flush된다. `main`이 끝날 때까지 보관할 것.
pub fn init(log_dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("cannot create log directory {}", log_dir.display()))?;

    let appender = rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .context("tracing subscriber already installed")?;

    Ok(guard)
}
