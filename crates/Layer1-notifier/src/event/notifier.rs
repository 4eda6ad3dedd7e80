//! Event Notifier - 우선순위 기반 이벤트 알림기
//!
//! 이벤트 이름 → 우선순위 버킷 → 등록 순서로 리스너를 저장한다.
//! 정렬된 호출 순서는 이벤트별로 캐시되고, 해당 이벤트의 등록이 바뀔 때만
//! 무효화된다.
//!
//! 모든 메서드는 `&self`를 받는다. 내부 잠금은 리스너 호출 중에 잡혀 있지
//! 않으므로 리스너 안에서 `listen`/`detach`/`notify`를 다시 불러도 된다.
//! 알림은 시작 시점의 스냅샷을 순회한다:
//!   - 알림 도중 추가된 리스너는 다음 알림부터 호출된다.
//!   - 알림 도중 제거된 리스너도 이번 알림에서는 호출된다 (일회성 제외).
//!
//! 리스너의 panic은 잡지 않는다. 호출자에게 그대로 전파된다.

use super::listener::{Listener, Propagation};
use crate::config::NotifierConfig;
use crate::{Error, Result};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

// ============================================================================
// Registration
// ============================================================================

/// 등록 ID (등록 단위 식별자)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RegistrationId(u64);

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "registration-{}", self.0)
    }
}

/// 저장된 등록 정보
struct Registration<A: ?Sized> {
    id: RegistrationId,
    listener: Listener<A>,
    /// 남은 호출 횟수 (`None`이면 무제한)
    remaining: Option<usize>,
}

/// 정렬 캐시 항목
struct Slot<A: ?Sized> {
    id: RegistrationId,
    listener: Listener<A>,
    limited: bool,
}

impl<A: ?Sized> From<&Registration<A>> for Slot<A> {
    fn from(registration: &Registration<A>) -> Self {
        Self {
            id: registration.id,
            listener: registration.listener.clone(),
            limited: registration.remaining.is_some(),
        }
    }
}

/// 우선순위 오름차순 버킷
type Buckets<A> = BTreeMap<i32, Vec<Registration<A>>>;

struct State<A: ?Sized> {
    listeners: HashMap<String, Buckets<A>>,
    sorted: HashMap<String, Arc<[Slot<A>]>>,
}

impl<A: ?Sized> State<A> {
    fn new() -> Self {
        Self {
            listeners: HashMap::new(),
            sorted: HashMap::new(),
        }
    }

    fn insert(&mut self, event_name: &str, priority: i32, registration: Registration<A>) {
        self.listeners
            .entry(event_name.to_string())
            .or_default()
            .entry(priority)
            .or_default()
            .push(registration);
        self.sorted.remove(event_name);
    }

    /// 우선순위 오름차순, 등록 순서대로 첫 번째 일치 항목의 위치
    fn position(
        &self,
        event_name: &str,
        matches: impl Fn(&Registration<A>) -> bool,
    ) -> Option<(i32, usize)> {
        self.listeners.get(event_name)?.iter().find_map(|(priority, bucket)| {
            bucket
                .iter()
                .position(|registration| matches(registration))
                .map(|index| (*priority, index))
        })
    }

    /// 등록 하나 제거, 빈 버킷과 빈 이벤트 항목도 함께 제거
    fn remove_at(
        &mut self,
        event_name: &str,
        priority: i32,
        index: usize,
    ) -> Option<Registration<A>> {
        let buckets = self.listeners.get_mut(event_name)?;
        let bucket = buckets.get_mut(&priority)?;
        let removed = bucket.remove(index);
        let bucket_empty = bucket.is_empty();

        if bucket_empty {
            buckets.remove(&priority);
            if buckets.is_empty() {
                self.listeners.remove(event_name);
            }
        }
        self.sorted.remove(event_name);

        Some(removed)
    }

    /// 횟수 제한 등록을 한 번 소비
    ///
    /// 이미 제거된 등록이면 `false`.
    fn consume(&mut self, event_name: &str, id: RegistrationId) -> bool {
        let Some((priority, index)) = self.position(event_name, |r| r.id == id) else {
            return false;
        };

        let exhausted = match self
            .listeners
            .get_mut(event_name)
            .and_then(|buckets| buckets.get_mut(&priority))
            .and_then(|bucket| bucket.get_mut(index))
        {
            Some(Registration {
                remaining: Some(remaining),
                ..
            }) if *remaining > 1 => {
                *remaining -= 1;
                false
            }
            Some(_) => true,
            None => return false,
        };

        if exhausted {
            self.remove_at(event_name, priority, index);
        }
        true
    }

    /// 정렬된 스냅샷 (캐시가 없으면 계산 후 저장)
    fn sorted(&mut self, event_name: &str) -> Option<Arc<[Slot<A>]>> {
        if let Some(slots) = self.sorted.get(event_name) {
            return Some(Arc::clone(slots));
        }

        let slots: Arc<[Slot<A>]> = self
            .listeners
            .get(event_name)?
            .values()
            .flatten()
            .map(Slot::from)
            .collect();
        self.sorted.insert(event_name.to_string(), Arc::clone(&slots));

        Some(slots)
    }
}

// ============================================================================
// EventNotifier
// ============================================================================

/// 이벤트 알림기
///
/// ## 사용법
///
/// ```
/// use event_notifier::{EventNotifier, Listener, Propagation};
/// use serde_json::{json, Value};
///
/// let notifier: EventNotifier = EventNotifier::new();
///
/// notifier
///     .listen("user.saved", Listener::new(|args: &[Value]| println!("saved {}", args[0])), 0)
///     .listen("user.saved", Listener::new(|_: &[Value]| Propagation::Stop), -10);
///
/// // 우선순위 -10 리스너가 먼저 실행되어 알림을 중단한다
/// assert!(!notifier.notify("user.saved", &[json!(42)]));
/// ```
pub struct EventNotifier<A: ?Sized = [Value]> {
    /// 설정
    config: NotifierConfig,

    /// 활성화 플래그
    enabled: AtomicBool,

    /// 등록 정보 + 정렬 캐시
    state: Mutex<State<A>>,

    /// 등록 ID 카운터
    registration_counter: AtomicU64,
}

impl<A: ?Sized> EventNotifier<A> {
    /// 기본 설정으로 알림기 생성
    pub fn new() -> Self {
        Self::with_config(NotifierConfig::default())
    }

    /// 커스텀 설정으로 알림기 생성
    pub fn with_config(config: NotifierConfig) -> Self {
        Self {
            enabled: AtomicBool::new(config.enabled),
            config,
            state: Mutex::new(State::new()),
            registration_counter: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    // ========================================================================
    // Enable / Disable
    // ========================================================================

    /// 알림 활성화
    pub fn enable(&self) -> &Self {
        self.enabled.store(true, Ordering::SeqCst);
        debug!("Event notifier enabled");
        self
    }

    /// 알림 비활성화 (notify가 아무것도 호출하지 않고 true 반환)
    pub fn disable(&self) -> &Self {
        self.enabled.store(false, Ordering::SeqCst);
        debug!("Event notifier disabled");
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// 리스너 등록
    ///
    /// 같은 우선순위에서는 등록 순서대로 호출된다.
    pub fn listen(&self, event_name: &str, listener: Listener<A>, priority: i32) -> &Self {
        self.register(event_name, listener, priority, None);
        self
    }

    /// 설정의 기본 우선순위로 리스너 등록
    pub fn listen_default(&self, event_name: &str, listener: Listener<A>) -> &Self {
        self.listen(event_name, listener, self.config.default_priority)
    }

    /// 일회성 리스너 등록
    ///
    /// 첫 호출 직전에 스스로 제거된다. 리스너가 `Stop`을 반환하든 말든 제거된다.
    pub fn once(&self, event_name: &str, listener: Listener<A>, priority: i32) -> &Self {
        self.register(event_name, listener, priority, Some(1));
        self
    }

    /// 설정의 기본 우선순위로 일회성 리스너 등록
    pub fn once_default(&self, event_name: &str, listener: Listener<A>) -> &Self {
        self.once(event_name, listener, self.config.default_priority)
    }

    /// `times`번 호출된 뒤 제거되는 리스너 등록
    pub fn many(
        &self,
        event_name: &str,
        times: usize,
        listener: Listener<A>,
        priority: i32,
    ) -> Result<&Self> {
        if times == 0 {
            return Err(Error::InvalidInput(format!(
                "listener limit for '{}' must be greater than zero",
                event_name
            )));
        }
        self.register(event_name, listener, priority, Some(times));
        Ok(self)
    }

    fn register(
        &self,
        event_name: &str,
        listener: Listener<A>,
        priority: i32,
        remaining: Option<usize>,
    ) -> RegistrationId {
        let id = RegistrationId(self.registration_counter.fetch_add(1, Ordering::SeqCst));

        self.state.lock().insert(
            event_name,
            priority,
            Registration {
                id,
                listener,
                remaining,
            },
        );

        debug!(
            event_name,
            priority,
            registration = %id,
            limit = ?remaining,
            "Registered event listener"
        );

        id
    }

    // ========================================================================
    // Detach
    // ========================================================================

    /// 리스너 하나 제거
    ///
    /// 우선순위 오름차순, 등록 순서로 찾은 첫 번째 일치 항목만 제거한다.
    /// 없는 이벤트나 없는 리스너는 무시한다.
    ///
    /// `listen`으로 등록한 항목만 대상이다. `once`/`many` 등록은 같은 핸들이라도
    /// 별개의 등록으로 취급되어 여기서 제거되지 않는다 (`detach_all`로만 제거).
    pub fn detach(&self, event_name: &str, listener: &Listener<A>) -> &Self {
        self.try_detach(event_name, listener);
        self
    }

    /// 리스너 하나 제거, 제거 여부 반환
    pub fn try_detach(&self, event_name: &str, listener: &Listener<A>) -> bool {
        let mut state = self.state.lock();
        let Some((priority, index)) = state.position(event_name, |r| {
            r.remaining.is_none() && r.listener == *listener
        }) else {
            return false;
        };
        let removed = state.remove_at(event_name, priority, index);
        drop(state);

        if let Some(registration) = &removed {
            debug!(
                event_name,
                priority,
                registration = %registration.id,
                "Detached event listener"
            );
        }

        removed.is_some()
    }

    /// 리스너 전체 제거
    ///
    /// `event_name`이 `None`이면 모든 이벤트의 리스너를 제거한다.
    pub fn detach_all(&self, event_name: Option<&str>) -> &Self {
        let mut state = self.state.lock();
        match event_name {
            Some(name) => {
                state.listeners.remove(name);
                state.sorted.remove(name);
            }
            None => {
                state.listeners.clear();
                state.sorted.clear();
            }
        }
        drop(state);

        debug!(event_name = ?event_name, "Detached all event listeners");
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// 이벤트에 리스너가 하나라도 있는지 확인
    pub fn has_listeners(&self, event_name: &str) -> bool {
        self.state.lock().listeners.contains_key(event_name)
    }

    /// 호출 순서대로 정렬된 리스너 목록
    ///
    /// 반환값은 스냅샷이다. 이후의 등록 변경은 반영되지 않는다.
    pub fn listeners(&self, event_name: &str) -> Vec<Listener<A>> {
        self.snapshot(event_name)
            .map(|slots| slots.iter().map(|slot| slot.listener.clone()).collect())
            .unwrap_or_default()
    }

    /// 이벤트의 등록 수
    pub fn listener_count(&self, event_name: &str) -> usize {
        self.state
            .lock()
            .listeners
            .get(event_name)
            .map_or(0, |buckets| buckets.values().map(Vec::len).sum())
    }

    /// 리스너가 있는 이벤트 이름 (정렬됨)
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state.lock().listeners.keys().cloned().collect();
        names.sort();
        names
    }

    fn snapshot(&self, event_name: &str) -> Option<Arc<[Slot<A>]>> {
        self.state.lock().sorted(event_name)
    }

    fn consume(&self, event_name: &str, id: RegistrationId) -> bool {
        self.state.lock().consume(event_name, id)
    }

    // ========================================================================
    // Notify
    // ========================================================================

    /// 이벤트 알림
    ///
    /// 리스너를 순서대로 호출한다. 리스너가 `Stop`을 반환하면 즉시 멈춘다.
    ///
    /// - `true`: 모든 리스너가 끝까지 실행됨 (리스너 없음, 비활성 포함)
    /// - `false`: 중단됨
    pub fn notify(&self, event_name: &str, args: &A) -> bool {
        if !self.is_enabled() {
            trace!(event_name, "Event notifier disabled, skipping notify");
            return true;
        }

        let Some(slots) = self.snapshot(event_name) else {
            return true;
        };

        for slot in slots.iter() {
            // 일회성 등록은 호출 전에 제거 (다른 곳에서 이미 제거됐으면 건너뜀)
            if slot.limited && !self.consume(event_name, slot.id) {
                continue;
            }

            if self.config.trace_dispatch {
                trace!(
                    event_name,
                    registration = %slot.id,
                    "Delivering event to listener"
                );
            }

            if slot.listener.call(args) == Propagation::Stop {
                trace!(
                    event_name,
                    registration = %slot.id,
                    "Event propagation stopped by listener"
                );
                return false;
            }
        }

        true
    }
}

impl<A: ?Sized> Default for EventNotifier<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized> fmt::Debug for EventNotifier<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventNotifier")
            .field("enabled", &self.is_enabled())
            .field("events", &self.event_names())
            .finish()
    }
}

// ============================================================================
// 테스트
// ============================================================================
