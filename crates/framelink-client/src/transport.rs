//! Transport seam between the host and one embedded context.
//!
//! The cross-context channel is modeled as mpsc in both directions: an
//! [`Endpoint`] wraps the sender feeding one embedded context, and the
//! listener consumes a receiver of raw inbound JSON frames. Real element
//! lookup and browser plumbing stay outside this crate; a host adapts its
//! actual bridge by forwarding frames into these channels.

use tokio::sync::mpsc;

use framelink_core::channel::{ChannelId, ChannelSource};
use framelink_core::protocol::Command;

/// Outbound half of the cross-context channel for one embedded player.
#[derive(Clone, Debug)]
pub struct Endpoint {
    tx: mpsc::Sender<Command>,
}

impl Endpoint {
    pub fn new(tx: mpsc::Sender<Command>) -> Self {
        Self { tx }
    }

    /// Convenience pair: an endpoint plus the receiver the embedded side
    /// (or a test) reads commands from.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Command>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    /// Fire-and-forget delivery: no acknowledgment, no retry. A full or
    /// closed channel drops the command with a diagnostic.
    pub(crate) fn send(&self, command: Command) {
        if let Err(e) = self.tx.try_send(command) {
            tracing::warn!(error = %e, "dropping outbound command: endpoint unavailable");
        }
    }
}

/// Raw descriptor of an embed anchor: its source locator plus the outbound
/// endpoint. Stands in for the anchoring element, whose lookup and creation
/// are the host's business.
pub struct EmbedTarget {
    /// Source locator as it appears on the anchor; empty means the anchor
    /// carries no locator and no channel identity is derivable.
    pub source_url: String,
    /// Sender into the embedded context.
    pub endpoint: Endpoint,
}

impl EmbedTarget {
    pub fn new(source_url: impl Into<String>, endpoint: Endpoint) -> Self {
        Self {
            source_url: source_url.into(),
            endpoint,
        }
    }
}

impl ChannelSource for EmbedTarget {
    fn channel_id(&self) -> Option<ChannelId> {
        if self.source_url.is_empty() {
            return None;
        }
        Some(ChannelId::from_url(&self.source_url))
    }
}
