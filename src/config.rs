//! 사용자 설정 (TOML)
//!
//! `$RAFDIR_SETTINGS_FILE` 또는 `~/.rafdir/settings.toml`에 저장된다.

use crate::models::{SortDescriptor, SortKey};
use crate::utils::error::{RafError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 설정 파일 경로 환경 변수
pub const SETTINGS_ENV: &str = "RAFDIR_SETTINGS_FILE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub version: u32,
    /// 숨김 파일 표시
    pub show_hidden: bool,
    /// 복사/이동/삭제 전 확인
    pub confirm_operations: bool,
    /// 삭제 시 휴지통 사용 (false면 영구 삭제)
    pub delete_to_trash: bool,
    /// 파일 뷰어가 읽는 최대 바이트
    pub viewer_max_bytes: u64,
    /// type | name | size | modified | extension
    pub sort_key: String,
    pub sort_ascending: bool,
    /// 북마크 단축키 → 디렉토리
    pub hotkeys: BTreeMap<String, PathBuf>,
}

impl Settings {
    pub const VERSION: u32 = 1;
    pub const DEFAULT_VIEWER_MAX_BYTES: u64 = 256 * 1024;

    /// 설정 파일 경로
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(custom) = env::var(SETTINGS_ENV) {
            let trimmed = custom.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        dirs::home_dir().map(|home| home.join(".rafdir").join("settings.toml"))
    }

    /// 파일에서 읽기
    ///
    /// 파일이 없으면 기본값. 형식이 깨졌거나 버전이 다르면 경고를 남기고 기본값.
    pub fn load_from(path: &Path) -> Self {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "settings file not found, using defaults");
                return Self::default();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read settings, using defaults");
                return Self::default();
            }
        };

        match Self::decode(&data) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "invalid settings, using defaults");
                Self::default()
            }
        }
    }

    /// 파일에 저장 (상위 디렉토리 생성)
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.encode()?)?;
        debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    pub fn encode(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| RafError::Config(e.to_string()))
    }

    pub fn decode(data: &str) -> Result<Self> {
        let parsed: Settings = toml::from_str(data).map_err(|e| RafError::Config(e.to_string()))?;
        if parsed.version != Self::VERSION {
            return Err(RafError::Config(format!(
                "unsupported settings version {} (expected {})",
                parsed.version,
                Self::VERSION
            )));
        }
        Ok(parsed)
    }

    /// 저장된 정렬 상태 (알 수 없는 기준은 이름순)
    pub fn sort_descriptor(&self) -> SortDescriptor {
        let key = SortKey::parse(&self.sort_key).unwrap_or(SortKey::Name);
        SortDescriptor::new(key, self.sort_ascending)
    }

    pub fn set_sort_descriptor(&mut self, sort: SortDescriptor) {
        self.sort_key = sort.key.as_str().to_string();
        self.sort_ascending = sort.ascending;
    }

    /// 북마크 조회 (`key`는 정규화된 문자)
    pub fn hotkey(&self, key: char) -> Option<&PathBuf> {
        self.hotkeys.get(&key.to_string())
    }

    pub fn set_hotkey(&mut self, key: char, path: PathBuf) {
        self.hotkeys.insert(key.to_string(), path);
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: Self::VERSION,
            show_hidden: false,
            confirm_operations: true,
            delete_to_trash: true,
            viewer_max_bytes: Self::DEFAULT_VIEWER_MAX_BYTES,
            sort_key: SortKey::Name.as_str().to_string(),
            sort_ascending: true,
            hotkeys: BTreeMap::new(),
        }
    }
}
