//! Inbound event frames (player → host).
//!
//! Wire shape: `{ "data": { "url": string, "type": string, "values"?: object } }`.
//! Sibling fields outside `data` are transport noise and are ignored. A frame
//! is valid iff `data.url` and `data.type` are present; validity is decided
//! here, at ingress, and nowhere else.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::channel::{ChannelId, ChannelSource};
use crate::error::{FramelinkError, Result};

/// Reserved event type: the remote endpoint finished its bootstrap. Observing
/// it activates the channel's player.
pub const EVENT_LOADED: &str = "loaded";

/// A validated inbound event.
#[derive(Debug, Clone)]
pub struct Event {
    /// Raw source locator as sent by the remote endpoint.
    pub source_url: String,
    /// Application event type, or [`EVENT_LOADED`].
    pub event_type: String,
    /// Attribute values pushed alongside the event. Empty when the frame
    /// carried no `values` object.
    pub values: Map<String, Value>,
}

impl ChannelSource for Event {
    fn channel_id(&self) -> Option<ChannelId> {
        Some(ChannelId::from_url(&self.source_url))
    }
}

// Tolerant frame used only for decoding; required-field checks happen after
// parsing so a missing field is a Malformed diagnostic, not a serde error
// about which exact key was absent.
#[derive(Debug, Deserialize)]
struct WireFrame {
    #[serde(default)]
    data: Option<WireData>,
}

#[derive(Debug, Deserialize)]
struct WireData {
    #[serde(default)]
    url: Option<String>,
    #[serde(rename = "type", default)]
    event_type: Option<String>,
    #[serde(default)]
    values: Option<Map<String, Value>>,
}

/// Decode and validate a raw inbound frame.
pub fn decode_event(raw: &str) -> Result<Event> {
    let frame: WireFrame = serde_json::from_str(raw)
        .map_err(|e| FramelinkError::Malformed(format!("invalid frame json: {e}")))?;

    let data = frame
        .data
        .ok_or_else(|| FramelinkError::Malformed("frame has no data".into()))?;
    let source_url = data
        .url
        .ok_or_else(|| FramelinkError::Malformed("frame data has no url".into()))?;
    let event_type = data
        .event_type
        .ok_or_else(|| FramelinkError::Malformed("frame data has no type".into()))?;

    Ok(Event {
        source_url,
        event_type,
        values: data.values.unwrap_or_default(),
    })
}
