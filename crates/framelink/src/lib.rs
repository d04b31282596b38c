//! Top-level facade crate for framelink.
//!
//! Re-exports the protocol core and the client stack so hosts can depend on a single crate.

pub mod core {
    pub use framelink_core::*;
}

pub mod client {
    pub use framelink_client::*;
}
