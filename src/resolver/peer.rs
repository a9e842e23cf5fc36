//! Host/port handling for peer socket addresses.

/// Error splitting a peer address into host and port.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeerAddrError {
    #[error("missing port in address {0:?}")]
    MissingPort(String),
    #[error("too many colons in address {0:?}")]
    TooManyColons(String),
    #[error("missing ']' in address {0:?}")]
    MissingBracket(String),
    #[error("unexpected '[' or ']' in address {0:?}")]
    UnexpectedBracket(String),
}

/// Split `host:port` or `[host]:port` into its parts.
///
/// Brackets are stripped from the host. A bare IPv6 address without
/// brackets is rejected because its port cannot be told apart.
pub fn split_host_port(addr: &str) -> Result<(&str, &str), PeerAddrError> {
    let colon = addr
        .rfind(':')
        .ok_or_else(|| PeerAddrError::MissingPort(addr.to_string()))?;

    // `open` and `close` mark where stray brackets start being an error.
    let (host, open, close) = if addr.starts_with('[') {
        let end = addr
            .find(']')
            .ok_or_else(|| PeerAddrError::MissingBracket(addr.to_string()))?;
        if end + 1 == addr.len() {
            return Err(PeerAddrError::MissingPort(addr.to_string()));
        }
        if end + 1 != colon {
            return if addr.as_bytes()[end + 1] == b':' {
                Err(PeerAddrError::TooManyColons(addr.to_string()))
            } else {
                Err(PeerAddrError::MissingPort(addr.to_string()))
            };
        }
        (&addr[1..end], 1, end + 1)
    } else {
        let host = &addr[..colon];
        if host.contains(':') {
            return Err(PeerAddrError::TooManyColons(addr.to_string()));
        }
        (host, 0, 0)
    };

    if addr[open..].contains('[') || addr[close..].contains(']') {
        return Err(PeerAddrError::UnexpectedBracket(addr.to_string()));
    }

    Ok((host, &addr[colon + 1..]))
}

/// Join a host and port, bracketing hosts that contain a colon.
pub fn join_host_port(host: &str, port: &str) -> String {
    if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}
