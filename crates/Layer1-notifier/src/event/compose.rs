//! Notifier trait - 다른 타입에 알림 기능 붙이기
//!
//! 호스트 타입이 [`EventNotifier`]를 필드로 갖고 `event_notifier()`만
//! 구현하면 나머지 메서드는 기본 구현으로 위임된다.
//!
//! ```
//! use event_notifier::{EventNotifier, Listener, Notifier};
//! use serde_json::Value;
//!
//! #[derive(Default)]
//! struct Repository {
//!     events: EventNotifier,
//! }
//!
//! impl Notifier for Repository {
//!     fn event_notifier(&self) -> &EventNotifier {
//!         &self.events
//!     }
//! }
//!
//! let repo = Repository::default();
//! repo.listen("repository.loaded", Listener::new(|_: &[Value]| {}), 0);
//! assert!(repo.has_listeners("repository.loaded"));
//! ```

use super::listener::Listener;
use super::notifier::EventNotifier;
use crate::Result;
use serde_json::Value;

/// 알림 기능 위임 trait
pub trait Notifier<A: ?Sized = [Value]> {
    /// 내장된 알림기
    fn event_notifier(&self) -> &EventNotifier<A>;

    fn enable_event_notifier(&self) -> &Self {
        self.event_notifier().enable();
        self
    }

    fn disable_event_notifier(&self) -> &Self {
        self.event_notifier().disable();
        self
    }

    fn listen(&self, event_name: &str, listener: Listener<A>, priority: i32) -> &Self {
        self.event_notifier().listen(event_name, listener, priority);
        self
    }

    /// 설정의 기본 우선순위로 등록
    fn listen_default(&self, event_name: &str, listener: Listener<A>) -> &Self {
        self.event_notifier().listen_default(event_name, listener);
        self
    }

    fn once(&self, event_name: &str, listener: Listener<A>, priority: i32) -> &Self {
        self.event_notifier().once(event_name, listener, priority);
        self
    }

    fn once_default(&self, event_name: &str, listener: Listener<A>) -> &Self {
        self.event_notifier().once_default(event_name, listener);
        self
    }

    fn many(
        &self,
        event_name: &str,
        times: usize,
        listener: Listener<A>,
        priority: i32,
    ) -> Result<&Self> {
        self.event_notifier()
            .many(event_name, times, listener, priority)?;
        Ok(self)
    }

    fn detach(&self, event_name: &str, listener: &Listener<A>) -> &Self {
        self.event_notifier().detach(event_name, listener);
        self
    }

    fn try_detach(&self, event_name: &str, listener: &Listener<A>) -> bool {
        self.event_notifier().try_detach(event_name, listener)
    }

    fn detach_all(&self, event_name: Option<&str>) -> &Self {
        self.event_notifier().detach_all(event_name);
        self
    }

    fn has_listeners(&self, event_name: &str) -> bool {
        self.event_notifier().has_listeners(event_name)
    }

    fn listeners(&self, event_name: &str) -> Vec<Listener<A>> {
        self.event_notifier().listeners(event_name)
    }

    fn listener_count(&self, event_name: &str) -> usize {
        self.event_notifier().listener_count(event_name)
    }

    fn notify(&self, event_name: &str, args: &A) -> bool {
        self.event_notifier().notify(event_name, args)
    }
}

impl<A: ?Sized> Notifier<A> for EventNotifier<A> {
    fn event_notifier(&self) -> &EventNotifier<A> {
        self
    }
}
