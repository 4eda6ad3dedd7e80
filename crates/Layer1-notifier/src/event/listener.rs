//! Listener - 알림 대상 콜백 핸들
//!
//! 클로저에는 동등성이 없으므로 [`Listener`]가 식별자 역할을 한다.
//! 같은 핸들을 clone한 값끼리만 같다. `detach`에는 등록할 때 넘긴 핸들의
//! clone을 넘겨야 한다.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Propagation
// ============================================================================

/// 리스너 호출 결과
///
/// `Stop`을 반환하면 현재 알림의 나머지 리스너는 호출되지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Propagation {
    /// 다음 리스너로 계속
    #[default]
    Continue,
    /// 알림 중단
    Stop,
}

impl Propagation {
    pub fn is_stop(self) -> bool {
        matches!(self, Propagation::Stop)
    }
}

/// 아무것도 반환하지 않는 리스너는 `Continue`
impl From<()> for Propagation {
    fn from(_: ()) -> Self {
        Propagation::Continue
    }
}

// ============================================================================
// Listener
// ============================================================================

/// 이벤트 리스너 핸들
///
/// `A`는 알림 인자 타입이다. 기본값은 순서 있는 인자 목록 `[Value]`.
pub struct Listener<A: ?Sized = [Value]> {
    callback: Arc<dyn Fn(&A) -> Propagation + Send + Sync>,
}

impl<A: ?Sized + 'static> Listener<A> {
    /// 클로저로 리스너 생성
    ///
    /// 클로저는 `()` 또는 [`Propagation`]을 반환할 수 있다.
    ///
    /// ```
    /// use event_notifier::{Listener, Propagation};
    /// use serde_json::Value;
    ///
    /// let log: Listener = Listener::new(|args: &[Value]| println!("{:?}", args));
    /// let guard: Listener = Listener::new(|_: &[Value]| Propagation::Stop);
    /// assert_ne!(log, guard);
    /// ```
    pub fn new<F, R>(f: F) -> Self
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
        R: Into<Propagation>,
    {
        Self {
            callback: Arc::new(move |args: &A| f(args).into()),
        }
    }
}

impl<A: ?Sized> Listener<A> {
    /// 리스너 호출
    pub fn call(&self, args: &A) -> Propagation {
        (self.callback)(args)
    }

    /// 두 핸들이 같은 등록 대상인지 확인
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl<A: ?Sized> Clone for Listener<A> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<A: ?Sized> PartialEq for Listener<A> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl<A: ?Sized> Eq for Listener<A> {}

impl<A: ?Sized> fmt::Debug for Listener<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener")
            .field(&(Arc::as_ptr(&self.callback) as *const ()))
            .finish()
    }
}
