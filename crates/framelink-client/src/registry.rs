//! Player registry: channel id → live player handle.
//!
//! Lookup is a direct map keyed by the derived channel id, behaviorally
//! equivalent to a first-match scan but O(1). Players are process-lifetime
//! objects; nothing ever unregisters them.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Deserialize;

use framelink_core::channel::ChannelId;
use framelink_core::error::{FramelinkError, Result};

use crate::player::Player;

/// What `register` does when a player already holds the channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Refuse the new registration; the existing player keeps the channel.
    #[default]
    Reject,
    /// The new player takes over the channel.
    Replace,
}

/// The set of known players, keyed by channel id.
pub struct PlayerRegistry {
    players: DashMap<ChannelId, Arc<Player>>,
    on_duplicate: DuplicatePolicy,
}

impl PlayerRegistry {
    pub fn new(on_duplicate: DuplicatePolicy) -> Self {
        Self {
            players: DashMap::new(),
            on_duplicate,
        }
    }

    /// Add a player to the live set. A second registration for the same
    /// channel follows the configured [`DuplicatePolicy`].
    pub fn register(&self, player: Arc<Player>) -> Result<()> {
        let channel = player.channel().clone();
        match self.players.entry(channel.clone()) {
            Entry::Occupied(mut occupied) => match self.on_duplicate {
                DuplicatePolicy::Reject => {
                    tracing::warn!(channel = %channel, "duplicate registration rejected");
                    Err(FramelinkError::DuplicateChannel(channel.to_string()))
                }
                DuplicatePolicy::Replace => {
                    tracing::warn!(channel = %channel, "replacing registered player");
                    occupied.insert(player);
                    Ok(())
                }
            },
            Entry::Vacant(vacant) => {
                tracing::debug!(channel = %channel, "player registered");
                vacant.insert(player);
                Ok(())
            }
        }
    }

    pub fn has(&self, channel: &ChannelId) -> bool {
        self.players.contains_key(channel)
    }

    pub fn get(&self, channel: &ChannelId) -> Option<Arc<Player>> {
        self.players.get(channel).map(|entry| Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
