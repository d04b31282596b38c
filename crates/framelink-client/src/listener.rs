//! Single subscriber to the cross-context channel.
//!
//! Every externally-arriving event enters the system here, and only here.
//! The listener validates the raw frame, resolves its channel, and routes it
//! to the registered player's emit path, or to the deferred queue when no
//! player exists yet. That miss path is the registration race the whole
//! design exists to resolve: events may arrive before their player does.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use framelink_core::channel::resolve;
use framelink_core::protocol::{event::decode_event, Message};

use crate::queue::DeferredQueue;
use crate::registry::PlayerRegistry;

struct Route {
    registry: Arc<PlayerRegistry>,
    queue: Arc<DeferredQueue>,
}

impl Route {
    fn dispatch(&self, raw: &str) {
        let event = match decode_event(raw) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "discarding inbound frame");
                return;
            }
        };
        let Some(channel) = resolve(&event) else {
            tracing::warn!("discarding inbound frame with no channel identity");
            return;
        };

        match self.registry.get(&channel) {
            // Registered player: synchronous dispatch within the handler.
            Some(player) => player.emit(event),
            // No player yet: park the event until one registers and activates.
            None => self.queue.add(Message::Event(event)),
        }
    }
}

/// Listener lifecycle: one subscription per client, started before any
/// player exists and stopped at teardown.
pub struct Listener {
    route: Arc<Route>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Listener {
    pub fn new(registry: Arc<PlayerRegistry>, queue: Arc<DeferredQueue>) -> Self {
        Self {
            route: Arc::new(Route { registry, queue }),
            task: Mutex::new(None),
        }
    }

    /// Subscribe to the inbound side of the cross-context channel. Exactly
    /// one subscription is held; a second `start` warns and is a no-op.
    pub fn start(&self, mut rx: mpsc::Receiver<String>) {
        let mut slot = match self.task.lock() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        if slot.is_some() {
            tracing::warn!("listener already started");
            return;
        }

        tracing::info!("listener start");
        let route = Arc::clone(&self.route);
        *slot = Some(tokio::spawn(async move {
            while let Some(raw) = rx.recv().await {
                route.dispatch(&raw);
            }
            tracing::debug!("inbound channel closed");
        }));
    }

    /// Drop the subscription. Idempotent.
    pub fn stop(&self) {
        let mut slot = match self.task.lock() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(handle) = slot.take() {
            tracing::info!("listener stop");
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        match self.task.lock() {
            Ok(slot) => slot.is_some(),
            Err(poisoned) => poisoned.into_inner().is_some(),
        }
    }

    /// Route one raw frame synchronously. This is the same path the
    /// subscription task runs; it exists for hosts that drive their own
    /// message loop and for deterministic tests.
    pub fn dispatch(&self, raw: &str) {
        self.route.dispatch(raw);
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use framelink_core::channel::ChannelId;
    use framelink_core::protocol::MessageClass;

    use crate::registry::DuplicatePolicy;

    fn listener() -> (Listener, Arc<PlayerRegistry>, Arc<DeferredQueue>) {
        let registry = Arc::new(PlayerRegistry::new(DuplicatePolicy::Reject));
        let queue = Arc::new(DeferredQueue::new(0));
        let listener = Listener::new(Arc::clone(&registry), Arc::clone(&queue));
        (listener, registry, queue)
    }

    #[test]
    fn malformed_frame_mutates_nothing() {
        let (listener, registry, queue) = listener();

        listener.dispatch(r#"{"data": {"type": "loaded"}}"#);
        listener.dispatch("not json");

        let channel = ChannelId::from_url("host/embed/abc");
        assert!(registry.is_empty());
        assert!(queue.is_empty(&channel, MessageClass::Event));
    }

    #[test]
    fn unregistered_channel_event_is_queued() {
        let (listener, _registry, queue) = listener();

        listener.dispatch(r#"{"data": {"url": "https://host/embed/abc", "type": "playing"}}"#);

        let channel = ChannelId::from_url("host/embed/abc");
        assert_eq!(queue.count(&channel, MessageClass::Event), 1);
    }
}
