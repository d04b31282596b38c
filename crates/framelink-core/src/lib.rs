//! framelink core: channel identity, message types, and the shared error surface.
//!
//! This crate defines the protocol-level contracts shared by the client stack
//! and by hosts that build their own plumbing: how a channel identity is
//! derived from a source locator, what an inbound event and an outbound
//! command look like structurally, and the error taxonomy. It intentionally
//! carries no runtime or transport dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed wire input must surface as `FramelinkError`/`Result` so a host
//! page never crashes on bad traffic from an embedded context.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod channel;
pub mod error;
pub mod protocol;

pub use channel::{resolve, ChannelId, ChannelSource};
pub use error::{FramelinkError, Result};
pub use protocol::{Command, Event, Message, MessageClass, EVENT_LOADED};
