//! Event System - 이벤트 등록/알림
//!
//! ## 아키텍처
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       EventNotifier                          │
//! │                                                              │
//! │  "user.saved" ─┬─ priority -10 ── [L3]                       │
//! │                ├─ priority   0 ── [L1, L4]   (등록 순서)       │
//! │                └─ priority   5 ── [L2]                       │
//! │                         │                                    │
//! │                         ▼  (첫 조회 시 정렬, 변경 시 무효화)       │
//! │  sorted["user.saved"] = [L3, L1, L4, L2]                     │
//! │                         │                                    │
//! │  notify("user.saved") ──┴─▶ L3 → L1 → L4 → L2                │
//! │                             (Stop 반환 시 즉시 중단)            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 사용법
//!
//! ```
//! use event_notifier::{EventNotifier, Listener, Propagation};
//! use serde_json::Value;
//!
//! let notifier: EventNotifier = EventNotifier::new();
//!
//! // 1. 리스너 등록 (낮은 우선순위 값이 먼저 실행)
//! let audit: Listener = Listener::new(|_: &[Value]| {});
//! notifier.listen("user.saved", audit.clone(), 0);
//!
//! // 2. 일회성 리스너
//! notifier.once("user.saved", Listener::new(|_: &[Value]| {}), -1);
//!
//! // 3. 알림 (false면 리스너가 중단시킨 것)
//! assert!(notifier.notify("user.saved", &[]));
//!
//! // 4. 리스너 해제
//! notifier.detach("user.saved", &audit);
//! assert!(!notifier.has_listeners("user.saved"));
//! ```

pub mod compose;
pub mod listener;
pub mod notifier;

// Re-exports
pub use compose::Notifier;
pub use listener::{Listener, Propagation};
pub use notifier::EventNotifier;
