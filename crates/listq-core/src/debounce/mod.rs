use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Delays a callback until calls to [`DebounceGate::schedule`] go quiet.
///
/// Each `schedule` supersedes the previous one: only the latest value can
/// settle, and it settles at most once. Dropping the gate cancels whatever is
/// pending.
pub struct DebounceGate {
    inner: Arc<Mutex<GateInner>>,
}

#[derive(Default)]
struct GateInner {
    generation: u64,
    pending: Option<CancellationToken>,
}

impl DebounceGate {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(GateInner::default())),
        }
    }

    /// Arms the gate with `value`. After `delay` without another `schedule` or
    /// [`cancel`](Self::cancel), `on_settle(value)` runs on a spawned task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<T, F>(&self, value: T, delay: Duration, on_settle: F)
    where
        T: Send + 'static,
        F: FnOnce(T) + Send + 'static,
    {
        let token = CancellationToken::new();
        let generation = {
            let mut inner = lock(&self.inner);
            if let Some(prev) = inner.pending.replace(token.clone()) {
                prev.cancel();
                trace!("debounce timer superseded");
            }
            inner.generation += 1;
            inner.generation
        };

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    // The timer may have elapsed in the same instant a newer
                    // schedule or a cancel took the lock; only the holder of
                    // the current generation settles.
                    let current = {
                        let mut inner = lock(&inner);
                        if inner.generation == generation && inner.pending.is_some() {
                            inner.pending = None;
                            true
                        } else {
                            false
                        }
                    };
                    if current {
                        on_settle(value);
                    }
                }
            }
        });
    }

    /// Drops the pending value without running its callback.
    ///
    /// Returns `true` if something was pending.
    pub fn cancel(&self) -> bool {
        let pending = lock(&self.inner).pending.take();
        match pending {
            Some(token) => {
                token.cancel();
                trace!("debounce timer cancelled");
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.inner).pending.is_some()
    }
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DebounceGate {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn lock(m: &Mutex<GateInner>) -> MutexGuard<'_, GateInner> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
