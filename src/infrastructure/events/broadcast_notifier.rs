//! Broadcast-based notifier.
//!
//! Events are fanned out to every live subscriber. There is no persistence and
//! no backpressure: a subscriber that falls more than the channel capacity
//! behind observes `RecvError::Lagged` and loses the oldest events.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::models::ClientEvent;
use crate::domain::ports::Notifier;

/// Default number of buffered events per subscriber.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Process-wide event channel backed by `tokio::sync::broadcast`.
#[derive(Debug)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<ClientEvent>,
    published: AtomicU64,
}

impl BroadcastNotifier {
    /// Notifier with [`DEFAULT_CHANNEL_CAPACITY`] buffered events.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Notifier buffering up to `capacity` events per subscriber (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            published: AtomicU64::new(0),
        }
    }

    /// Subscribe to the event stream.
    ///
    /// Only events published after this call are observed.
    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.sender.subscribe()
    }

    /// Total events published, whether or not anyone received them.
    pub fn published_count(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for BroadcastNotifier {
    fn publish(&self, event: ClientEvent) {
        self.published.fetch_add(1, Ordering::Relaxed);
        let name = event.name();
        // Sending only fails when nobody is listening.
        match self.sender.send(event) {
            Ok(receivers) => debug!(event = name, receivers, "event published"),
            Err(_) => debug!(event = name, "event dropped, no subscribers"),
        }
    }
}

/// Notifier that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn publish(&self, _event: ClientEvent) {}
}
