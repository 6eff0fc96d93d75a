//! Single cancellation scope shared by every stage of a pipeline run.
//!
//! One flag, checked between items, tripped at most once - mirrors a
//! `context.WithCancel` plus a `sync.Once`-guarded stop function.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Notify;

/// Cancellation scope for one pipeline run.
///
/// Cloning shares the same underlying flag - every stage holds a clone and
/// polls [`CancelScope::is_cancelled`] between items.
#[derive(Clone)]
pub struct CancelScope {
    flag: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancelScope {
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Trips the scope. Idempotent - a second call is a no-op, matching the
    /// one-shot latch semantics of the counter-stop trigger.
    pub fn cancel(&self) {
        if !self.flag.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Waits until either the scope is cancelled or `dur` elapses, then
    /// cancels it. Used to implement the wall-clock timeout safety net.
    pub async fn cancel_after(&self, dur: Duration) {
        let notified = self.notify.notified();
        tokio::select! {
            _ = notified, if !self.is_cancelled() => {}
            _ = tokio::time::sleep(dur) => {}
        }
        self.cancel();
    }
}

impl Default for CancelScope {
    fn default() -> Self {
        Self::new()
    }
}

/// A stop trigger that fires exactly once regardless of how many callers
/// race to invoke it.
#[derive(Clone)]
pub struct StopLatch {
    fired: Arc<AtomicBool>,
}

impl StopLatch {
    pub fn new() -> Self {
        Self {
            fired: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Runs `f` the first time this is called across all clones; returns
    /// whether this call was the one that fired it.
    pub fn fire_once(&self, f: impl FnOnce()) -> bool {
        if !self.fired.swap(true, Ordering::SeqCst) {
            f();
            true
        } else {
            false
        }
    }
}

impl Default for StopLatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn stop_latch_fires_exactly_once() {
        let latch = StopLatch::new();
        let count = Arc::new(AtomicU32::new(0));

        for _ in 0..8 {
            let count = count.clone();
            latch.fire_once(|| {
                count.fetch_add(1, Ordering::SeqCst);
            });
        }

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancel_is_idempotent_and_observable() {
        let scope = CancelScope::new();
        assert!(!scope.is_cancelled());
        scope.cancel();
        scope.cancel();
        assert!(scope.is_cancelled());
    }
}
