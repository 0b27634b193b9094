//! Instance-Scoped Debouncer
//!
//! Each debouncer is owned by the component or session that created it;
//! there is no process-global timer, so independent instances can never
//! cancel each other's pending work.

use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Delays work until the caller has been quiet for the configured delay
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedule `work`, cancelling any still-pending earlier call
    pub async fn debounce<F, Fut>(&self, work: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            work().await;
        });

        let mut pending = self.pending.lock().await;
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    /// Cancel any pending work without scheduling more
    pub async fn cancel(&self) {
        if let Some(handle) = self.pending.lock().await.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        // Pending work must not outlive its owner.
        if let Ok(mut pending) = self.pending.try_lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
    }
}
