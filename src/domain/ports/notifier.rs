use crate::domain::models::ClientEvent;

/// Port trait for broadcasting client events to any number of listeners
///
/// Publishing never fails and never blocks. Delivery is best-effort: with no
/// listeners the event is simply dropped.
pub trait Notifier: Send + Sync {
    /// Publish an event to every current listener
    fn publish(&self, event: ClientEvent);
}
