//! Message types exchanged with embedded players.
//!
//! Two message classes exist: inbound events (player → host) and outbound
//! commands (host → player). A message is classified exactly once, at
//! ingress, by its structural shape; no type tag travels on the wire. Once
//! built, messages are immutable.

pub mod command;
pub mod event;

pub use command::Command;
pub use event::{Event, EVENT_LOADED};

use crate::channel::{ChannelId, ChannelSource};

/// Message class, the first half of a deferred-queue bucket key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageClass {
    /// Inbound, player → host.
    Event,
    /// Outbound, host → player.
    Command,
}

impl MessageClass {
    /// String form used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageClass::Event => "event",
            MessageClass::Command => "command",
        }
    }
}

/// A classified message, as stored by the deferred queue.
#[derive(Debug, Clone)]
pub enum Message {
    Event(Event),
    Command(Command),
}

impl Message {
    pub fn class(&self) -> MessageClass {
        match self {
            Message::Event(_) => MessageClass::Event,
            Message::Command(_) => MessageClass::Command,
        }
    }
}

impl ChannelSource for Message {
    fn channel_id(&self) -> Option<ChannelId> {
        match self {
            Message::Event(event) => event.channel_id(),
            Message::Command(command) => command.channel_id(),
        }
    }
}
