//! Remote address resolution.
//!
//! # Data Flow
//! ```text
//! peer socket address ("host:port" / "[host]:port")
//!     + forwarded header value (optional)
//!     → peer.rs (split host and port)
//!     → chain::walk (trusted client hop, if any)
//!     → remote.rs (re-join resolved host with the peer's port)
//! ```
//!
//! # Design Decisions
//! - Fail closed: anything unresolvable falls back to the observed peer
//! - The peer's port is kept; only the host is replaced
//! - Callers learn where the address came from through `Resolution::source`

pub mod peer;
pub mod remote;

pub use peer::{join_host_port, split_host_port, PeerAddrError};
pub use remote::{
    resolve, resolve_remote_addr, resolve_remote_addr_from_trusted_peer, Fallback, PeerPolicy,
    Resolution, Source,
};
