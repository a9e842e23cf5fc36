//! Request middleware.

pub mod forwarded;

pub use forwarded::{forwarded_for_middleware, ForwardedState};
