//! Per-channel player handle and its readiness state machine.
//!
//! A player starts NotReady and becomes Active exactly once, when a "loaded"
//! event is observed for its channel; there is no transition back. While
//! NotReady, outbound commands are deferred; activation drains the backlog.

pub mod attributes;

pub use attributes::PlayerAttributes;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, Weak};

use serde_json::{Map, Value};
use tokio::sync::broadcast;

use framelink_core::channel::{resolve, ChannelId, ChannelSource};
use framelink_core::protocol::{Command, Event, Message, MessageClass, EVENT_LOADED};

use crate::api;
use crate::queue::DeferredQueue;
use crate::registry::PlayerRegistry;
use crate::transport::Endpoint;

/// Capacity of the per-player notification channel. Subscribers that lag
/// behind skip old notifications.
const NOTIFY_CAPACITY: usize = 16;

/// Host-visible notification of player activity, broadcast for every
/// accepted inbound event regardless of readiness. Besides attribute
/// snapshots this is the host's only signal that an embed is alive.
#[derive(Debug, Clone)]
pub struct Notification {
    pub source_url: String,
    pub event_type: String,
    pub values: Map<String, Value>,
}

impl Notification {
    fn from_event(event: &Event) -> Self {
        Self {
            source_url: event.source_url.clone(),
            event_type: event.event_type.clone(),
            values: event.values.clone(),
        }
    }
}

/// Handle to one embedded player.
#[derive(Debug)]
pub struct Player {
    channel: ChannelId,
    endpoint: Endpoint,
    ready: AtomicBool,
    attrs: RwLock<PlayerAttributes>,
    notify: broadcast::Sender<Notification>,
    queue: Arc<DeferredQueue>,
    // Weak: the registry owns the player, not the other way around.
    registry: Weak<PlayerRegistry>,
}

impl Player {
    pub(crate) fn new(
        channel: ChannelId,
        endpoint: Endpoint,
        queue: Arc<DeferredQueue>,
        registry: Weak<PlayerRegistry>,
    ) -> Self {
        let (notify, _) = broadcast::channel(NOTIFY_CAPACITY);
        Self {
            channel,
            endpoint,
            ready: AtomicBool::new(false),
            attrs: RwLock::new(PlayerAttributes::default()),
            notify,
            queue,
            registry,
        }
    }

    pub fn channel(&self) -> &ChannelId {
        &self.channel
    }

    pub fn is_active(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Subscribe to host-visible notifications for this player.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notify.subscribe()
    }

    /// Current attribute snapshot.
    pub fn attributes(&self) -> PlayerAttributes {
        match self.attrs.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Deliver one inbound event to this player. Runs in both states: a
    /// "loaded" event first flips the player Active, then the notification
    /// is broadcast and allow-listed attribute values are applied.
    pub fn emit(&self, event: Event) {
        if event.event_type == EVENT_LOADED {
            self.activate();
        }

        tracing::debug!(channel = %self.channel, event = %event.event_type, "emit");
        let _ = self.notify.send(Notification::from_event(&event));

        if event.values.is_empty() {
            return;
        }
        let mut attrs = match self.attrs.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        for (key, value) in &event.values {
            if !api::is_supported_attribute(key) {
                tracing::debug!(channel = %self.channel, %key, "unsupported attribute ignored");
                continue;
            }
            if !attrs.apply(key, value) {
                tracing::warn!(channel = %self.channel, %key, "non-numeric attribute value ignored");
            }
        }
    }

    /// Request execution of a command. NotReady defers it to the queue;
    /// Active sends it verbatim over the endpoint, fire-and-forget.
    pub fn exec(&self, command: Command) {
        if !self.is_active() {
            tracing::debug!(
                channel = %self.channel,
                command = %command.command_type,
                "player not active, deferring command"
            );
            self.queue.add(Message::Command(command));
            return;
        }

        tracing::debug!(channel = %self.channel, command = %command.command_type, "exec");
        self.endpoint.send(command);
    }

    /// One-way transition to Active, then backlog drain: first this channel's
    /// deferred events replayed through `emit`, then its deferred commands,
    /// each dispatched through the registry by the command's own resolved
    /// channel. Idempotent: a second call never produces a second drain pass.
    pub fn activate(&self) {
        if self.ready.swap(true, Ordering::SeqCst) {
            return;
        }
        tracing::info!(channel = %self.channel, "player active");

        self.queue.consume(&self.channel, MessageClass::Event, |message| {
            if let Message::Event(event) = message {
                self.emit(event);
            }
        });

        let registry = self.registry.upgrade();
        self.queue
            .consume(&self.channel, MessageClass::Command, |message| {
                let Message::Command(command) = message else {
                    return;
                };
                let Some(target) = resolve(&command) else {
                    return;
                };
                match registry.as_ref().and_then(|r| r.get(&target)) {
                    Some(player) => player.exec(command),
                    None => tracing::warn!(
                        channel = %target,
                        command = %command.command_type,
                        "dropping queued command: no registered player"
                    ),
                }
            });
    }
}

impl ChannelSource for Player {
    // The stored id; never re-derived.
    fn channel_id(&self) -> Option<ChannelId> {
        Some(self.channel.clone())
    }
}
