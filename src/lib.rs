//! Trustworthy client address resolution behind forwarding proxies.
//!
//! A request's `X-Forwarded-For` header is attacker-controlled: anything left
//! of the hops appended by proxies you run can be forged. This crate walks the
//! chain from the right, believing only hops inside a configured [`TrustSet`],
//! and falls back to the observed socket peer whenever the chain cannot be
//! believed.
//!
//! ```
//! use xff_resolver::{resolve_remote_addr, TrustSet};
//!
//! let trust = TrustSet::build(["127.0.0.0/16"]).unwrap();
//! let addr = resolve_remote_addr(
//!     "127.0.0.9:4321",
//!     Some("1.1.1.1, 8.8.8.8, 127.0.0.1, 127.0.0.2"),
//!     &trust,
//! );
//! assert_eq!(addr, "8.8.8.8:4321");
//! ```

// Core resolution
pub mod chain;
pub mod resolver;
pub mod trust;

// Service integration
pub mod config;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use chain::resolve as resolve_chain;
pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use resolver::{resolve_remote_addr, resolve_remote_addr_from_trusted_peer, Resolution};
pub use trust::{ConfigError, Preset, TrustPredicate, TrustSet};
