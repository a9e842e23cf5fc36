//! Right-to-left trust walk over a forwarded chain.

use std::net::IpAddr;

use crate::trust::TrustPredicate;

/// Split a header value into trimmed hop tokens, left-most first.
///
/// An empty value yields a single empty token.
pub fn tokenize(header: &str) -> impl DoubleEndedIterator<Item = &str> {
    header.split(',').map(str::trim)
}

/// State of a walk over the chain, scanning from the right-most hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkState<'a> {
    /// Still consuming tokens. `candidate` is the left-most trusted hop seen so far.
    Scanning { candidate: Option<&'a str> },
    /// Hit a token that is not an address. The candidate, if any, is the answer.
    StoppedWithCandidate(Option<&'a str>),
    /// Hit a valid address outside the trust set: that hop is the client.
    StoppedAtToken(&'a str),
    /// Every token was a trusted address; holds the left-most one.
    Exhausted(&'a str),
}

impl<'a> WalkState<'a> {
    pub fn start() -> Self {
        WalkState::Scanning { candidate: None }
    }

    /// Consume the next token to the left. Terminal states ignore it.
    pub fn step<P>(self, token: &'a str, trusted: &P) -> Self
    where
        P: TrustPredicate + ?Sized,
    {
        let candidate = match self {
            WalkState::Scanning { candidate } => candidate,
            terminal => return terminal,
        };

        if token.parse::<IpAddr>().is_err() {
            return WalkState::StoppedWithCandidate(candidate);
        }

        if trusted.is_trusted(token) {
            WalkState::Scanning {
                candidate: Some(token),
            }
        } else {
            WalkState::StoppedAtToken(token)
        }
    }

    /// Close a walk that ran out of tokens.
    pub fn finish(self) -> Self {
        match self {
            WalkState::Scanning {
                candidate: Some(token),
            } => WalkState::Exhausted(token),
            WalkState::Scanning { candidate: None } => WalkState::StoppedWithCandidate(None),
            terminal => terminal,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, WalkState::Scanning { .. })
    }

    /// The address this state resolves to, if any.
    pub fn resolved(&self) -> Option<&'a str> {
        match *self {
            WalkState::Scanning { .. } => None,
            WalkState::StoppedWithCandidate(candidate) => candidate,
            WalkState::StoppedAtToken(token) | WalkState::Exhausted(token) => Some(token),
        }
    }
}

/// Run the walk over `header` to a terminal state.
pub fn walk<'a, P>(header: &'a str, trusted: &P) -> WalkState<'a>
where
    P: TrustPredicate + ?Sized,
{
    let mut state = WalkState::start();
    for token in tokenize(header).rev() {
        state = state.step(token, trusted);
        if state.is_terminal() {
            tracing::trace!(token, state = ?state, "Chain walk stopped");
            return state;
        }
    }
    state.finish()
}

/// Resolve the client address claimed by a forwarded chain.
///
/// Returns the verbatim token that can be believed as the origin, or `None`
/// when nothing in the header can be trusted.
pub fn resolve<'a, P>(header: &'a str, trusted: &P) -> Option<&'a str>
where
    P: TrustPredicate + ?Sized,
{
    walk(header, trusted).resolved()
}
