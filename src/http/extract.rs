//! Extractor for the resolved client address.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};

use crate::resolver::Resolution;

/// The resolved client address of the current request.
///
/// Requires [`forwarded_for_middleware`](crate::http::middleware::forwarded_for_middleware)
/// to run first; otherwise extraction fails with 500.
#[derive(Debug, Clone)]
pub struct ClientAddr(pub Resolution);

impl<S> FromRequestParts<S> for ClientAddr
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Resolution>()
            .cloned()
            .map(ClientAddr)
            .ok_or((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Forwarded-for middleware not installed",
            ))
    }
}
