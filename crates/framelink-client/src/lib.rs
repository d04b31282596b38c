//! framelink client: host-side stack for talking to embedded players.
//!
//! Wires the channel resolver, deferred queue, player registry, listener,
//! and the per-player state machine into one explicitly-constructed context
//! ([`EmbedClient`]). The only transport is the cross-context messaging
//! channel; everything is asynchronous, unordered across channels, and
//! tolerant of messages arriving before their consumer exists.

pub mod api;
pub mod client;
pub mod config;
pub mod listener;
pub mod player;
pub mod queue;
pub mod registry;
pub mod transport;

pub use client::EmbedClient;
pub use config::ClientConfig;
pub use listener::Listener;
pub use player::{Notification, Player, PlayerAttributes};
pub use queue::DeferredQueue;
pub use registry::{DuplicatePolicy, PlayerRegistry};
pub use transport::{EmbedTarget, Endpoint};
