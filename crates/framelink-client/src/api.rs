//! Attribute and method surface of the embedded media player.
//!
//! This is domain vocabulary layered over the protocol mechanics: which
//! attributes a remote endpoint may push into host-visible state, and which
//! convenience verbs a host can call on a player handle. The core never
//! hardcodes this list; it only consults the two contracts below.

use serde_json::{json, Value};

use framelink_core::channel::ChannelId;
use framelink_core::protocol::Command;

use crate::player::Player;

/// Media player verbs supported by the client.
pub const SUPPORTED_METHODS: &[&str] = &[
    "play", "pause", "toggle", "seek", "mute", "setVolume", "chapter", "subtitle",
];

/// Attributes a remote endpoint is allowed to push onto a player.
pub const SUPPORTED_ATTRIBUTES: &[&str] = &["volume", "currentTime", "duration"];

/// Allow-list check consulted before any externally-pushed value is applied.
pub fn is_supported_attribute(key: &str) -> bool {
    SUPPORTED_ATTRIBUTES.contains(&key)
}

/// Wire command type for a method name: setter-style names lose their `set`
/// prefix (`setVolume` → `volume`); everything else maps to itself.
pub fn command_type(method: &str) -> String {
    match method.strip_prefix("set") {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_uppercase()) => {
            rest.to_ascii_lowercase()
        }
        _ => method.to_string(),
    }
}

/// Build a well-formed command addressed to `channel`.
pub fn build_command(channel: &ChannelId, command_type: &str, value: Value) -> Command {
    Command {
        target_url: channel.to_string(),
        command_type: command_type.to_string(),
        value,
    }
}

/// Convenience verbs. Each builds a command through the api surface and goes
/// through `exec`, so calls made before activation queue transparently.
impl Player {
    fn invoke(&self, method: &str, value: Value) {
        let ty = command_type(method);
        self.exec(build_command(self.channel(), &ty, value));
    }

    pub fn play(&self) {
        self.invoke("play", Value::Null);
    }

    pub fn pause(&self) {
        self.invoke("pause", Value::Null);
    }

    pub fn toggle(&self) {
        self.invoke("toggle", Value::Null);
    }

    pub fn seek(&self, seconds: f64) {
        self.invoke("seek", json!(seconds));
    }

    pub fn mute(&self) {
        self.invoke("mute", Value::Null);
    }

    pub fn set_volume(&self, volume: f64) {
        self.invoke("setVolume", json!(volume));
    }

    pub fn chapter(&self, index: u32) {
        self.invoke("chapter", json!(index));
    }

    pub fn subtitle(&self, track: u32) {
        self.invoke("subtitle", json!(track));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_allow_list() {
        assert!(is_supported_attribute("volume"));
        assert!(is_supported_attribute("currentTime"));
        assert!(is_supported_attribute("duration"));
        assert!(!is_supported_attribute("rogueField"));
        assert!(!is_supported_attribute("Volume"));
    }

    #[test]
    fn setter_names_are_normalized() {
        assert_eq!(command_type("setVolume"), "volume");
        assert_eq!(command_type("play"), "play");
        // Only `set` followed by an uppercase letter is a setter.
        assert_eq!(command_type("settle"), "settle");
    }

    #[test]
    fn every_supported_method_has_a_command_type() {
        let types: Vec<String> = SUPPORTED_METHODS.iter().map(|m| command_type(m)).collect();
        assert_eq!(
            types,
            ["play", "pause", "toggle", "seek", "mute", "volume", "chapter", "subtitle"]
        );
    }

    #[test]
    fn build_command_targets_the_channel() {
        let channel = ChannelId::from_url("https://host/embed/abc");
        let cmd = build_command(&channel, "seek", json!(7));
        assert_eq!(cmd.target_url, "host/embed/abc");
        assert_eq!(cmd.command_type, "seek");
        assert_eq!(cmd.value, json!(7));
    }
}
