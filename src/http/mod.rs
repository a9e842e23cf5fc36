//! HTTP integration subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (peer socket address via ConnectInfo)
//!     → server.rs (Axum setup, trace / request-id / timeout layers)
//!     → middleware/forwarded.rs (resolve client origin, rewrite ConnectInfo)
//!     → extract.rs (ClientAddr for handlers)
//!     → echo handler
//! ```

pub mod extract;
pub mod middleware;
pub mod server;

pub use extract::ClientAddr;
pub use middleware::{forwarded_for_middleware, ForwardedState};
pub use server::{HttpServer, ServerError};
