//! Error types for event-notifier
//!
//! 레지스트리 자체(listen/detach/notify)는 에러를 만들지 않는다.
//! 여기 정의된 에러는 설정 로딩과 잘못된 등록 인자에만 쓰인다.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// event-notifier 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // 등록 관련
    // ========================================================================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// 설정 파일 문제로 생긴 에러인지 확인
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::Config(_) | Error::Io(_) | Error::Json(_) | Error::Toml(_)
        )
    }

    /// 설정 에러 생성 헬퍼
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }
}
