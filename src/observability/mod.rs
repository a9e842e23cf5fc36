//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Resolver, middleware, config reload produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (resolution and reload counters)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured fields (peer, remote_addr, source) on every event
//! - The chain walk itself only logs at trace level
//! - Metrics are cheap (atomic increments) and no-ops until installed

pub mod logging;
pub mod metrics;
