//! Immutable set of trusted proxy ranges.

use std::net::IpAddr;
use std::sync::Arc;

use crate::trust::{ConfigError, NetworkPrefix};

/// Ordered, immutable set of trusted proxy ranges.
///
/// Cloning is cheap and clones share the same prefixes. An empty set is the
/// trust-all configuration (see [`TrustSet::is_trusted`](crate::trust::TrustPredicate)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustSet {
    prefixes: Arc<[NetworkPrefix]>,
}

impl Default for TrustSet {
    fn default() -> Self {
        Self::from_prefixes(Vec::new())
    }
}

impl TrustSet {
    /// Build a set from CIDR literals.
    ///
    /// Entries are validated in order and the first invalid one aborts
    /// construction. An empty input yields the trust-all set.
    pub fn build<I, S>(literals: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let prefixes = literals
            .into_iter()
            .map(|literal| literal.as_ref().parse::<NetworkPrefix>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_prefixes(prefixes))
    }

    /// The trust-all set.
    pub fn trust_all() -> Self {
        Self::default()
    }

    pub fn from_prefixes(prefixes: Vec<NetworkPrefix>) -> Self {
        Self {
            prefixes: prefixes.into(),
        }
    }

    /// Prefixes in configuration order.
    pub fn prefixes(&self) -> &[NetworkPrefix] {
        &self.prefixes
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Returns true for the trust-all set.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Returns true if `addr` falls in at least one configured range.
    ///
    /// This is plain membership: an empty set contains nothing. Use the
    /// [`TrustPredicate`](crate::trust::TrustPredicate) impl for the
    /// trust-all rule.
    pub fn contains(&self, addr: &IpAddr) -> bool {
        self.prefixes.iter().any(|prefix| prefix.contains(addr))
    }

    /// Prefixes rendered back to CIDR strings, for logging.
    pub fn to_strings(&self) -> Vec<String> {
        self.prefixes.iter().map(ToString::to_string).collect()
    }
}
