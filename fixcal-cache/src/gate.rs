//! One-shot broadcast gate.
//!
//! A [`Publisher`] fires once, by value, so a second publication does not
//! type-check. Any number of [`ReadyGate`] clones wait for that single value.
//! Waiters that subscribe after publication see it immediately.

use tokio::sync::watch;

/// Creates a linked publisher/gate pair.
pub fn ready_gate<T>() -> (Publisher<T>, ReadyGate<T>) {
    let (tx, rx) = watch::channel(None);
    (Publisher { tx }, ReadyGate { rx })
}

/// Write side of a gate. Consumed by [`publish`](Publisher::publish).
///
/// Dropping it without publishing closes the gate: waiters get `None`.
#[derive(Debug)]
pub struct Publisher<T> {
    tx: watch::Sender<Option<T>>,
}

impl<T> Publisher<T> {
    /// Publishes `value` and wakes every waiter.
    pub fn publish(self, value: T) {
        // send_replace stores the value even when nobody is subscribed yet.
        self.tx.send_replace(Some(value));
    }
}

/// Read side of a gate.
#[derive(Debug)]
pub struct ReadyGate<T> {
    rx: watch::Receiver<Option<T>>,
}

impl<T> Clone for ReadyGate<T> {
    fn clone(&self) -> Self {
        Self { rx: self.rx.clone() }
    }
}

impl<T: Clone> ReadyGate<T> {
    /// Waits for the published value.
    ///
    /// Returns `None` if the publisher was dropped without publishing.
    pub async fn wait(&self) -> Option<T> {
        let mut rx = self.rx.clone();
        let published = rx.wait_for(Option::is_some).await.ok()?;
        published.as_ref().cloned()
    }

    /// Returns the value if it has been published, without waiting.
    pub fn peek(&self) -> Option<T> {
        self.rx.borrow().as_ref().cloned()
    }
}

impl<T> ReadyGate<T> {
    /// Returns true once the value has been published.
    pub fn is_ready(&self) -> bool {
        self.rx.borrow().is_some()
    }
}
