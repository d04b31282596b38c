//! Typed player state, updated only through the attribute allow-list.
//!
//! The remote endpoint pushes attribute values alongside events; anything
//! outside the allow-list never lands here, so a hostile or buggy embed
//! cannot grow arbitrary state on the host side.

use serde_json::Value;

/// Snapshot of the remotely-pushed player state. All fields start at zero
/// until the embed reports real values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerAttributes {
    pub volume: f64,
    pub current_time: f64,
    pub duration: f64,
}

impl PlayerAttributes {
    /// Apply one wire key/value pair. Returns false when the key is not a
    /// known attribute or the value is not numeric; callers decide whether
    /// that is worth a diagnostic.
    pub fn apply(&mut self, key: &str, value: &Value) -> bool {
        let Some(number) = value.as_f64() else {
            return false;
        };
        match key {
            "volume" => self.volume = number,
            "currentTime" => self.current_time = number,
            "duration" => self.duration = number,
            _ => return false,
        }
        true
    }
}
