mod app;
mod config;
mod core;
mod logging;
mod models;
mod system;
mod ui;
mod utils;

use anyhow::{Context, Result};
use app::App;
use config::Settings;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::env;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};

const POLL_TIMEOUT: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    // 로그 디렉토리를 못 만들어도 앱은 띄운다
    let _log_guard = logging::default_log_dir().and_then(|dir| match logging::init(&dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("logging disabled: {:#}", e);
            None
        }
    });

    let cwd = env::current_dir().context("cannot determine current directory")?;
    let mut args = env::args_os().skip(1).map(PathBuf::from);
    let left = start_dir(args.next(), &cwd);
    let right = start_dir(args.next(), &cwd);
    info!(left = %left.display(), right = %right.display(), "starting");

    let mut app = App::new(left, right, Settings::default_path())
        .context("cannot open start directories")?;

    enable_raw_mode().context("cannot enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("cannot enter alternate screen");
    }

    let res = Terminal::new(CrosstermBackend::new(stdout))
        .context("cannot create terminal")
        .and_then(|mut terminal| {
            let res = run_app(&mut terminal, &mut app);
            let _ = terminal.show_cursor();
            res
        });

    // 루프가 실패해도 터미널은 원래대로
    disable_raw_mode().context("cannot disable raw mode")?;
    execute!(io::stdout(), LeaveAlternateScreen).context("cannot leave alternate screen")?;

    if let Err(e) = &res {
        error!(error = %format!("{:#}", e), "terminated with error");
    } else {
        info!("exited");
    }
    res
}

/// 시작 디렉토리 (없거나 디렉토리가 아니면 현재 디렉토리)
///
/// ".."가 남은 루트는 상위 항목이 잘못된 곳을 가리키므로 정규화해서 쓴다.
fn start_dir(arg: Option<PathBuf>, cwd: &std::path::Path) -> PathBuf {
    match arg {
        None => cwd.to_path_buf(),
        Some(path) => {
            let path = if path.is_absolute() {
                path
            } else {
                cwd.join(path)
            };
            match path.canonicalize() {
                Ok(dir) if dir.is_dir() => dir,
                _ => {
                    warn!(path = %path.display(), "not a directory, using current directory");
                    cwd.to_path_buf()
                }
            }
        }
    }
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal
            .draw(|f| {
                app.layout.update(f.area());
                app.sync_scroll();
                ui::renderer::render(f, app);
            })
            .context("draw failed")?;

        if event::poll(POLL_TIMEOUT).context("event poll failed")? {
            // 윈도우는 Release도 보내므로 Press만 처리
            if let Event::Key(key) = event::read().context("event read failed")? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.modifiers, key.code);
                }
            }
        }

        app.clear_expired_toast();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
