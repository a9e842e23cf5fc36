//! Forwarded chain walking.
//!
//! # Data Flow
//! ```text
//! X-Forwarded-For value
//!     → walker.rs tokenize (split on ',', trim)
//!     → walker.rs WalkState (right to left, one token per step)
//!     → resolved client address, or none
//! ```
//!
//! # Design Decisions
//! - Proxies append, so only the right-most run of trusted hops is believed
//! - Never look left of the first untrusted or unparseable token
//! - Total over all inputs: no panics, no errors, `None` means "use the peer"

pub mod walker;

pub use walker::{resolve, tokenize, walk, WalkState};
