//! The client context: registry + deferred queue + listener under one roof.
//!
//! Explicitly constructed rather than ambient process state, so tests and
//! multi-document hosts can run independent instances without shared global
//! mutation.

use std::sync::Arc;

use tokio::sync::mpsc;

use framelink_core::channel::{resolve, ChannelId};
use framelink_core::error::{FramelinkError, Result};

use crate::config::ClientConfig;
use crate::listener::Listener;
use crate::player::Player;
use crate::queue::DeferredQueue;
use crate::registry::PlayerRegistry;
use crate::transport::EmbedTarget;

/// One host document's view of its embedded players.
pub struct EmbedClient {
    registry: Arc<PlayerRegistry>,
    queue: Arc<DeferredQueue>,
    listener: Listener,
}

impl EmbedClient {
    pub fn new(cfg: ClientConfig) -> Self {
        let registry = Arc::new(PlayerRegistry::new(cfg.registry.on_duplicate));
        let queue = Arc::new(DeferredQueue::new(cfg.queue.warn_threshold));
        let listener = Listener::new(Arc::clone(&registry), Arc::clone(&queue));
        Self {
            registry,
            queue,
            listener,
        }
    }

    /// Start the inbound subscription. Meant to run before any player is
    /// connected, so early frames are parked rather than lost.
    pub fn listen(&self, rx: mpsc::Receiver<String>) {
        self.listener.start(rx);
    }

    /// Stop the inbound subscription.
    pub fn shutdown(&self) {
        self.listener.stop();
    }

    /// Route one raw inbound frame synchronously, for hosts that drive their
    /// own message loop instead of handing the client a channel.
    pub fn dispatch(&self, raw: &str) {
        self.listener.dispatch(raw);
    }

    /// Construction entry point: derive the channel id from the target's
    /// source locator, build a NotReady player with default attributes, and
    /// register it. The player stays NotReady until its channel reports
    /// "loaded".
    pub fn connect(&self, target: EmbedTarget) -> Result<Arc<Player>> {
        let channel: ChannelId = resolve(&target)
            .ok_or_else(|| FramelinkError::Malformed("embed target has no source locator".into()))?;

        let player = Arc::new(Player::new(
            channel,
            target.endpoint,
            Arc::clone(&self.queue),
            Arc::downgrade(&self.registry),
        ));
        self.registry.register(Arc::clone(&player))?;
        Ok(player)
    }

    /// [`connect`], then invoke `on_ready` once, synchronously, after
    /// construction — not after activation.
    ///
    /// [`connect`]: Self::connect
    pub fn connect_with<F>(&self, target: EmbedTarget, on_ready: F) -> Result<Arc<Player>>
    where
        F: FnOnce(&Arc<Player>),
    {
        let player = self.connect(target)?;
        on_ready(&player);
        tracing::debug!(channel = %player.channel(), "ready callback invoked");
        Ok(player)
    }

    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    pub fn queue(&self) -> &DeferredQueue {
        &self.queue
    }
}

impl Default for EmbedClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}
