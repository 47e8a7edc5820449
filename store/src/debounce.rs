//! Trailing-edge debounce for filter edits.
//!
//! Each [`Debouncer::schedule`] call supersedes the previously scheduled job:
//! its handle is cancelled before the new timer starts, so out of any burst of
//! calls only the last one can ever run. Cancelling only reaches the waiting
//! phase; a job whose timer already elapsed runs to completion.

use std::future::Future;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Handle to one scheduled job.
#[derive(Debug)]
pub(crate) struct DebounceHandle {
    token: CancellationToken,
    fired: Arc<AtomicBool>,
}

impl DebounceHandle {
    pub(crate) fn cancel(&self) {
        self.token.cancel();
    }

    /// True while the timer is still waiting.
    pub(crate) fn is_pending(&self) -> bool {
        !self.token.is_cancelled() && !self.fired.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub(crate) struct Debouncer {
    delay: Duration,
    runtime: Handle,
    pending: Mutex<Option<DebounceHandle>>,
}

impl Debouncer {
    pub(crate) fn new(delay: Duration, runtime: Handle) -> Self {
        Self {
            delay,
            runtime,
            pending: Mutex::new(None),
        }
    }

    pub(crate) fn schedule<F, Fut>(&self, job: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let fired = Arc::new(AtomicBool::new(false));
        let handle = DebounceHandle {
            token: token.clone(),
            fired: Arc::clone(&fired),
        };
        if let Some(previous) = self.lock().replace(handle) {
            previous.cancel();
        }

        let delay = self.delay;
        self.runtime.spawn(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => {
                    trace!("debounced job superseded");
                    return;
                }
                () = tokio::time::sleep(delay) => {}
            }
            fired.store(true, Ordering::Release);
            job().await;
        });
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.lock().as_ref().is_some_and(DebounceHandle::is_pending)
    }

    pub(crate) fn cancel(&self) {
        if let Some(handle) = self.lock().take() {
            handle.cancel();
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<DebounceHandle>> {
        match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
