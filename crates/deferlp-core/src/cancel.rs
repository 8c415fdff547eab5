//! Cancellation of long-running engine calls.
//!
//! A [`CancelToken`] is handed to whoever may want to stop a solve (another
//! thread, a signal handler, a UI). While `optimize` or `compute_iis` runs,
//! the model installs the engine's terminator into the token; `cancel`
//! forwards to it. The terminator is removed again on every exit path.

use deferlp_engine::Terminate;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Slot = Option<Arc<dyn Terminate>>;

#[derive(Clone, Default)]
pub struct CancelToken {
    slot: Arc<Mutex<Slot>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Ask the running call to terminate.
    ///
    /// Returns `false` when no call is running; the request is not
    /// remembered for later calls.
    pub fn cancel(&self) -> bool {
        let terminator = self.lock().clone();
        match terminator {
            Some(terminator) => {
                tracing::debug!(
                    component = "cancel",
                    operation = "cancel",
                    status = "success",
                    "Forwarding termination request"
                );
                terminator.terminate();
                true
            }
            None => {
                tracing::debug!(
                    component = "cancel",
                    operation = "cancel",
                    status = "warn",
                    "No engine call in progress"
                );
                false
            }
        }
    }

    /// Whether a call is currently running under this token.
    pub fn is_armed(&self) -> bool {
        self.lock().is_some()
    }

    /// Install `terminator` until the returned guard is dropped.
    pub(crate) fn install(&self, terminator: Arc<dyn Terminate>) -> CancelGuard<'_> {
        let previous = self.lock().replace(terminator);
        CancelGuard {
            token: self,
            previous,
        }
    }
}

impl std::fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelToken")
            .field("armed", &self.is_armed())
            .finish()
    }
}

/// Restores the token's previous terminator on drop.
pub(crate) struct CancelGuard<'a> {
    token: &'a CancelToken,
    previous: Slot,
}

impl Drop for CancelGuard<'_> {
    fn drop(&mut self) {
        *self.token.lock() = self.previous.take();
    }
}

#[cfg(test)]
mod tests {
    use super::CancelToken;
    use deferlp_engine::Terminate;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counter(AtomicUsize);

    impl Terminate for Counter {
        fn terminate(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn cancel_without_running_call_is_a_no_op() {
        let token = CancelToken::new();
        assert!(!token.cancel());
        assert!(!token.is_armed());
    }

    #[test]
    fn guard_forwards_then_uninstalls() {
        let token = CancelToken::new();
        let counter = Arc::new(Counter::default());
        {
            let _guard = token.install(counter.clone());
            assert!(token.is_armed());
            assert!(token.clone().cancel());
        }
        assert!(!token.is_armed());
        assert!(!token.cancel());
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn nested_guards_restore_previous_terminator() {
        let token = CancelToken::new();
        let outer = Arc::new(Counter::default());
        let inner = Arc::new(Counter::default());
        let _outer_guard = token.install(outer.clone());
        {
            let _inner_guard = token.install(inner.clone());
            token.cancel();
        }
        token.cancel();
        assert_eq!(inner.0.load(Ordering::SeqCst), 1);
        assert_eq!(outer.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn guard_uninstalls_on_panic() {
        let token = CancelToken::new();
        let counter = Arc::new(Counter::default());
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = token.install(counter.clone());
            panic!("engine blew up");
        }));
        assert!(result.is_err());
        assert!(!token.is_armed());
    }
}
