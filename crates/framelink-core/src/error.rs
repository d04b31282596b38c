//! Shared error type across framelink crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, FramelinkError>;

/// Unified error type used by the core and the client stack.
#[derive(Debug, Error)]
pub enum FramelinkError {
    /// A message failed structural validation at ingress.
    #[error("malformed message: {0}")]
    Malformed(String),
    /// No player is registered for the target channel.
    #[error("unknown channel: {0}")]
    UnknownChannel(String),
    /// A player is already registered for this channel.
    #[error("duplicate channel: {0}")]
    DuplicateChannel(String),
    /// Head fetch from an empty or absent queue bucket. Callers must check
    /// emptiness first; hitting this is a contract violation, not a
    /// recoverable condition.
    #[error("empty queue bucket: {0}")]
    EmptyBucket(String),
    /// Config failed strict parsing or validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("internal: {0}")]
    Internal(String),
}
