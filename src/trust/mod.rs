//! Trusted proxy ranges.
//!
//! # Data Flow
//! ```text
//! CIDR strings (config file, CLI flags, preset)
//!     → prefix.rs (parse one CIDR literal into a NetworkPrefix)
//!     → set.rs (fail-fast build into an immutable TrustSet)
//!     → predicate.rs (address string → trusted?)
//!     → shared via Arc to every request
//! ```
//!
//! # Design Decisions
//! - A TrustSet is never mutated; reloads build a new one and swap it
//! - An empty TrustSet trusts every address, it does not trust none
//! - Order of prefixes is kept for diagnostics only, membership ignores it

pub mod error;
pub mod predicate;
pub mod prefix;
pub mod presets;
pub mod set;

pub use error::ConfigError;
pub use predicate::TrustPredicate;
pub use prefix::{AddressFamily, NetworkPrefix};
pub use presets::Preset;
pub use set::TrustSet;
