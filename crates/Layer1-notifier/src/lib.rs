//! # event-notifier
//!
//! 프로세스 내부 이벤트 알림기:
//! - Event: 이름별 리스너 등록, 우선순위 정렬, 중단 가능한 알림
//! - Config: 알림기 설정 (JSON/TOML)
//! - Error: 설정/입력 에러
//!
//! 알림은 동기적으로 호출자 스레드에서 실행된다. 리스너 안에서 발생한
//! panic은 잡지 않고 `notify` 호출자에게 전파된다.

pub mod config;
pub mod error;
pub mod event;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{NotifierConfig, NOTIFIER_CONFIG_FILE};

// ============================================================================
// Event (이벤트 시스템)
// ============================================================================
pub use event::{EventNotifier, Listener, Notifier, Propagation};
