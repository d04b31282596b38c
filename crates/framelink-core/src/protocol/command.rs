//! Outbound command messages (host → player).
//!
//! A command is sent verbatim over the cross-context channel as
//! `{ "url": string, "type": string, "value": any }` with no envelope
//! transformation. All three fields are mandatory; `value` may be the null
//! sentinel but must be explicitly set, which serde enforces by rejecting a
//! frame where the key is absent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::channel::{ChannelId, ChannelSource};

/// An outbound command addressed to one channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Command {
    /// Target locator; conventionally the scheme-stripped channel id.
    #[serde(rename = "url")]
    pub target_url: String,
    /// Command verb understood by the remote endpoint (e.g. "play", "seek").
    #[serde(rename = "type")]
    pub command_type: String,
    /// Command argument; `Value::Null` for argument-less verbs.
    pub value: Value,
}

impl ChannelSource for Command {
    fn channel_id(&self) -> Option<ChannelId> {
        Some(ChannelId::from_url(&self.target_url))
    }
}
