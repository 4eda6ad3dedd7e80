//! Notifier Config - 알림기 설정
//!
//! JSON 또는 TOML 파일에서 읽을 수 있다.
//!
//! ```toml
//! enabled = true
//! defaultPriority = 0
//! traceDispatch = false
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 설정 파일명
pub const NOTIFIER_CONFIG_FILE: &str = "notifier.toml";

/// 이벤트 알림기 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifierConfig {
    /// 생성 직후 알림 활성화 여부
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// `listen_default` / `once_default`가 쓰는 우선순위
    #[serde(default)]
    pub default_priority: i32,

    /// 리스너 호출마다 trace 로그 출력
    #[serde(default)]
    pub trace_dispatch: bool,
}

fn default_enabled() -> bool {
    true
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            default_priority: 0,
            trace_dispatch: false,
        }
    }
}

impl NotifierConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load
    // ========================================================================

    /// JSON 문자열에서 로드
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse JSON config: {}", e)))
    }

    /// TOML 문자열에서 로드
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 파일에서 로드 (확장자로 형식 결정)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| Error::config(format!("{} has no extension", path.display())))?;

        if !matches!(extension, "json" | "toml") {
            return Err(Error::config(format!(
                "Unsupported config extension: {}",
                extension
            )));
        }

        let content = std::fs::read_to_string(path)?;
        if extension == "json" {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// 파일이 없으면 `None`
    pub fn load_optional(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn default_priority(mut self, priority: i32) -> Self {
        self.default_priority = priority;
        self
    }

    pub fn trace_dispatch(mut self, trace: bool) -> Self {
        self.trace_dispatch = trace;
        self
    }
}
