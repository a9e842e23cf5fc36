//! Forwarded-for middleware.
//! Resolves the client origin for every request before it reaches a handler.

use std::net::SocketAddr;
use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, HeaderName, Request},
    middleware::Next,
    response::Response,
};

use crate::config::TrustConfig;
use crate::observability::metrics;
use crate::resolver::{resolve, PeerPolicy};
use crate::trust::{ConfigError, TrustSet};

/// State shared by every request passing through the middleware.
///
/// The trust set is swapped atomically on reload; each request works on the
/// snapshot it loaded, never on a set that changes under it.
#[derive(Clone)]
pub struct ForwardedState {
    trust: Arc<ArcSwap<TrustSet>>,
    header: HeaderName,
    policy: PeerPolicy,
    rewrite_connect_info: bool,
}

impl ForwardedState {
    pub fn new(trust: TrustSet, header: HeaderName, policy: PeerPolicy, rewrite_connect_info: bool) -> Self {
        Self {
            trust: Arc::new(ArcSwap::from_pointee(trust)),
            header,
            policy,
            rewrite_connect_info,
        }
    }

    /// Current trust set snapshot.
    pub fn trust(&self) -> Arc<TrustSet> {
        self.trust.load_full()
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }

    /// Replace the trust set with the one `config` describes.
    ///
    /// On error the current set stays in place. Header name, peer policy and
    /// connect-info rewriting are fixed at startup.
    pub fn reload(&self, config: &TrustConfig) -> Result<(), ConfigError> {
        let trust = config.trust_set()?;
        self.trust.store(Arc::new(trust));
        Ok(())
    }
}

/// Join every value of `name` into one comma list.
///
/// Returns `None` when the header is absent. A value that is not visible
/// ASCII makes the whole chain unusable, so an empty chain is returned.
fn forwarded_header(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    let mut values = headers.get_all(name).iter().peekable();
    values.peek()?;

    let mut parts = Vec::new();
    for value in values {
        match value.to_str() {
            Ok(v) => parts.push(v),
            Err(_) => return Some(String::new()),
        }
    }
    Some(parts.join(", "))
}

pub async fn forwarded_for_middleware(
    State(state): State<ForwardedState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let header = forwarded_header(req.headers(), &state.header);
    let trust = state.trust.load();
    let peer_str = peer.to_string();

    let resolution = resolve(&peer_str, header.as_deref(), &**trust, state.policy);
    metrics::record_resolution(resolution.source);

    tracing::debug!(
        peer = %peer,
        remote_addr = %resolution.addr,
        source = resolution.source.as_str(),
        "Resolved remote address"
    );

    if state.rewrite_connect_info && resolution.is_forwarded() {
        match resolution.addr.parse::<SocketAddr>() {
            Ok(addr) => {
                req.extensions_mut().insert(ConnectInfo(addr));
            }
            Err(e) => {
                tracing::warn!(remote_addr = %resolution.addr, error = %e, "Resolved address is not a socket address");
            }
        }
    }

    req.extensions_mut().insert(resolution);
    next.run(req).await
}
