//! Named lifecycle events emitted by the host runtime
//!
//! Subscribers receive every event emitted after they subscribed. A
//! [`Subscription`] is detached by disposing it, which consumes the handle.

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::debug;

/// Emitted by the host after the runtime finished (re)loading
pub const RELOAD_EVENT: &str = "reload";

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    pub name: String,
}

impl LifecycleEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

/// Broadcast hub for lifecycle events
#[derive(Debug, Clone)]
pub struct LifecycleHooks {
    sender: broadcast::Sender<LifecycleEvent>,
}

impl LifecycleHooks {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Emits an event, returning how many subscribers it reached
    pub fn emit(&self, name: impl Into<String>) -> usize {
        self.sender.send(LifecycleEvent::new(name)).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for LifecycleHooks {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a lifecycle event subscription
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<LifecycleEvent>,
}

impl Subscription {
    /// Next event, or `None` once every emitter is gone
    pub async fn recv(&mut self) -> Option<LifecycleEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Lifecycle subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Detaches from the event stream permanently
    pub fn dispose(self) {
        drop(self);
    }
}
