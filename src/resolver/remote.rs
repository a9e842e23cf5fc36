//! Combine the observed peer with the forwarded chain.

use std::net::IpAddr;

use serde::Serialize;

use crate::chain;
use crate::resolver::peer::{join_host_port, split_host_port};
use crate::trust::TrustPredicate;

/// Whether the peer must itself be trusted before its header is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeerPolicy {
    /// Walk the header whatever the peer is.
    #[default]
    Any,
    /// Only walk the header when the peer host passes the predicate.
    ///
    /// A dual-stack listener reports IPv4 peers as `::ffff:a.b.c.d`; the peer
    /// is checked in its IPv4 form. Forwarded tokens are never unmapped.
    Trusted,
}

/// Why the peer address was kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// The request carried no forwarded header.
    NoHeader,
    /// The peer address could not be split into host and port.
    InvalidPeer,
    /// The peer is not a trusted proxy (only under [`PeerPolicy::Trusted`]).
    UntrustedPeer,
    /// The chain walk found nothing it could believe.
    Unresolved,
}

/// Where a resolved remote address came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "reason")]
pub enum Source {
    Forwarded,
    Peer(Fallback),
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Forwarded => "forwarded",
            Source::Peer(Fallback::NoHeader) => "no_header",
            Source::Peer(Fallback::InvalidPeer) => "invalid_peer",
            Source::Peer(Fallback::UntrustedPeer) => "untrusted_peer",
            Source::Peer(Fallback::Unresolved) => "unresolved",
        }
    }
}

/// A resolved remote address and the observed peer it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// `host:port` or `[host]:port` to treat as the client.
    pub addr: String,
    /// The directly connected peer, unchanged.
    pub peer: String,
    pub source: Source,
}

impl Resolution {
    fn peer(peer: &str, fallback: Fallback) -> Self {
        Self {
            addr: peer.to_string(),
            peer: peer.to_string(),
            source: Source::Peer(fallback),
        }
    }

    /// Returns true if the address came from the forwarded chain.
    pub fn is_forwarded(&self) -> bool {
        self.source == Source::Forwarded
    }
}

/// Resolve the remote address for a request.
///
/// `header` is the forwarded header value, `None` when the request had none.
/// Every failure falls back to `peer` unchanged.
pub fn resolve<P>(peer: &str, header: Option<&str>, trusted: &P, policy: PeerPolicy) -> Resolution
where
    P: TrustPredicate + ?Sized,
{
    let Some(header) = header else {
        return Resolution::peer(peer, Fallback::NoHeader);
    };

    let (peer_host, port) = match split_host_port(peer) {
        Ok(parts) => parts,
        Err(e) => {
            tracing::debug!(peer, error = %e, "Peer address not splittable, keeping it");
            return Resolution::peer(peer, Fallback::InvalidPeer);
        }
    };

    if policy == PeerPolicy::Trusted && !peer_is_trusted(peer_host, trusted) {
        tracing::debug!(peer, "Peer is not a trusted proxy, ignoring forwarded header");
        return Resolution::peer(peer, Fallback::UntrustedPeer);
    }

    match chain::resolve(header, trusted) {
        Some(client) => Resolution {
            addr: join_host_port(client, port),
            peer: peer.to_string(),
            source: Source::Forwarded,
        },
        None => {
            tracing::debug!(peer, header, "Forwarded chain unresolved, keeping peer");
            Resolution::peer(peer, Fallback::Unresolved)
        }
    }
}

fn peer_is_trusted<P>(host: &str, trusted: &P) -> bool
where
    P: TrustPredicate + ?Sized,
{
    match host.parse::<IpAddr>() {
        Ok(ip) => trusted.is_trusted(&ip.to_canonical().to_string()),
        Err(_) => trusted.is_trusted(host),
    }
}

/// Resolve the remote address, walking the header whatever the peer is.
pub fn resolve_remote_addr<P>(peer: &str, header: Option<&str>, trusted: &P) -> String
where
    P: TrustPredicate + ?Sized,
{
    resolve(peer, header, trusted, PeerPolicy::Any).addr
}

/// Resolve the remote address, reading the header only from a trusted peer.
pub fn resolve_remote_addr_from_trusted_peer<P>(peer: &str, header: Option<&str>, trusted: &P) -> String
where
    P: TrustPredicate + ?Sized,
{
    resolve(peer, header, trusted, PeerPolicy::Trusted).addr
}
