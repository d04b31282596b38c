//! Channel identity derivation.
//!
//! A channel id is the scheme-stripped form of a player's source locator and
//! is the sole join key between commands, events, and players. Matching is by
//! value: two messages carrying equal channel ids address the same player.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical identity of one embedded player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    /// Derive a channel id from a raw source URL by dropping everything up to
    /// and including the first `//`. A locator without a scheme separator is
    /// already canonical and is taken as-is.
    pub fn from_url(url: &str) -> Self {
        let id = match url.split_once("//") {
            Some((_, rest)) => rest,
            None => url,
        };
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything a channel id can be derived from: a player handle (stored id), an
/// inbound event (source url), an outbound command (target url), or a raw
/// source descriptor.
pub trait ChannelSource {
    /// The channel this value is addressed to, or `None` when no identity is
    /// derivable.
    fn channel_id(&self) -> Option<ChannelId>;
}

impl ChannelSource for ChannelId {
    fn channel_id(&self) -> Option<ChannelId> {
        Some(self.clone())
    }
}

/// Resolve the channel identity of any message or handle. Pure and
/// side-effect-free; an underivable identity is `None`, never an error.
pub fn resolve<S: ChannelSource + ?Sized>(source: &S) -> Option<ChannelId> {
    source.channel_id()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn strips_scheme_prefix() {
        assert_eq!(
            ChannelId::from_url("https://host/embed/abc").as_str(),
            "host/embed/abc"
        );
        assert_eq!(
            ChannelId::from_url("http://host/embed/abc").as_str(),
            "host/embed/abc"
        );
    }

    #[test]
    fn protocol_relative_locator() {
        assert_eq!(ChannelId::from_url("//host/embed/abc").as_str(), "host/embed/abc");
    }

    #[test]
    fn already_canonical_locator_is_identity() {
        assert_eq!(ChannelId::from_url("host/embed/abc").as_str(), "host/embed/abc");
    }

    #[test]
    fn equal_ids_match_by_value() {
        let a = ChannelId::from_url("https://host/embed/abc");
        let b = ChannelId::from_url("host/embed/abc");
        assert_eq!(a, b);
    }

    #[test]
    fn resolve_of_id_is_a_clone() {
        let id = ChannelId::from_url("host/x");
        assert_eq!(resolve(&id), Some(id));
    }
}
