use super::*;
use crate::core::actions::BookmarkCommand;

impl App {
    pub(super) fn execute_bookmark(&mut self, command: BookmarkCommand) {
        match command {
            BookmarkCommand::Store(key) => self.store_bookmark(key),
            BookmarkCommand::Recall(key) => self.recall_bookmark(key),
        }
    }

    /// Alt+Shift+키: 활성 패널 루트를 키에 저장하고 바로 설정 파일에 기록
    pub fn store_bookmark(&mut self, key: char) {
        let root = self
            .active_path()
            .canonicalize()
            .unwrap_or_else(|_| self.active_path().to_path_buf());
        info!(key = %key, path = %root.display(), "bookmark stored");
        self.settings.set_hotkey(key, root.clone());
        self.save_settings();
        self.set_toast(&format!("Bookmark {} -> {}", key, root.display()));
    }

    /// Alt+키: 저장된 디렉토리로 활성 패널 이동
    ///
    /// 없는 키나 더 이상 디렉토리가 아닌 경로는 토스트만 띄우고 패널은 그대로.
    pub fn recall_bookmark(&mut self, key: char) {
        let Some(path) = self.settings.hotkey(key).cloned() else {
            self.set_toast(&format!("No bookmark for Alt+{}", key));
            return;
        };
        if !path.is_dir() {
            warn!(key = %key, path = %path.display(), "bookmark target missing");
            self.set_toast(&format!("Bookmark {} is gone: {}", key, path.display()));
            return;
        }

        match self.active_pane_mut().set_root(path.clone()) {
            Ok(()) => self.set_toast(&format!("Bookmark {}: {}", key, path.display())),
            Err(e) => {
                warn!(key = %key, path = %path.display(), error = %e, "bookmark recall failed");
                self.set_toast(&format!("Cannot open bookmark {}: {}", key, e));
            }
        }
    }
}
