//! Deferred, cancellable expiry tasks.
//!
//! Each scheduled action is a tracked tokio task sleeping until its deadline.
//! [`ExpiryScheduler::shutdown`] cancels every pending action and waits for
//! the tasks to finish, so nothing outlives the cache.

use std::time::Duration;

use tokio::task::AbortHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::trace;

/// Runs actions after a delay unless cancelled first.
#[derive(Debug, Default)]
pub struct ExpiryScheduler {
    shutdown: CancellationToken,
    tasks: TaskTracker,
}

impl ExpiryScheduler {
    /// Creates an idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `action` once `after` has elapsed.
    ///
    /// Must be called from within a tokio runtime. After [`shutdown`](Self::shutdown)
    /// the action is dropped without running.
    pub fn schedule<F>(&self, after: Duration, action: F) -> ExpiryHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let shutdown = self.shutdown.clone();
        let task = self.tasks.spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => trace!("expiry cancelled by shutdown"),
                _ = tokio::time::sleep(after) => action(),
            }
        });

        ExpiryHandle(task.abort_handle())
    }

    /// Number of actions that have neither run nor been cancelled.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true once [`shutdown`](Self::shutdown) has been called.
    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Cancels every pending action and waits for their tasks to exit.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        self.tasks.close();
        self.tasks.wait().await;
    }
}

/// Handle to one scheduled action.
#[derive(Debug)]
pub struct ExpiryHandle(AbortHandle);

impl ExpiryHandle {
    /// Cancels the action if it has not run yet.
    pub fn cancel(&self) {
        self.0.abort();
    }

    /// Returns true once the action has run or been cancelled.
    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }
}
