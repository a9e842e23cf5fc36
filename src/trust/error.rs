//! Trust set construction errors.

/// Error raised while building a [`TrustSet`](super::TrustSet).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A configured entry is not a CIDR literal.
    #[error("invalid CIDR address: {literal}")]
    InvalidCidr {
        /// The offending entry, verbatim.
        literal: String,
        #[source]
        source: ipnet::AddrParseError,
    },
}

impl ConfigError {
    /// The configuration entry that failed to parse.
    pub fn literal(&self) -> &str {
        match self {
            ConfigError::InvalidCidr { literal, .. } => literal,
        }
    }
}
