//! Event distribution infrastructure
//!
//! Notifier adapters for client lifecycle events:
//! - Broadcast channel shared by any number of subscribers
//! - Null notifier that discards everything

pub mod broadcast_notifier;

pub use broadcast_notifier::{BroadcastNotifier, NullNotifier, DEFAULT_CHANNEL_CAPACITY};
