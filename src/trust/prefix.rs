//! A single trusted network range.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use ipnet::IpNet;

use crate::trust::ConfigError;

/// Address family of a prefix or address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    /// Family of a parsed address.
    pub fn of(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => AddressFamily::V4,
            IpAddr::V6(_) => AddressFamily::V6,
        }
    }
}

/// An immutable CIDR range.
///
/// The stored address is always the network address: `127.0.0.1/8` is kept
/// as `127.0.0.0/8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkPrefix {
    net: IpNet,
}

impl NetworkPrefix {
    /// Base (network) address of the range.
    pub fn network(&self) -> IpAddr {
        self.net.network()
    }

    /// Number of leading bits that must match.
    pub fn prefix_len(&self) -> u8 {
        self.net.prefix_len()
    }

    pub fn family(&self) -> AddressFamily {
        match self.net {
            IpNet::V4(_) => AddressFamily::V4,
            IpNet::V6(_) => AddressFamily::V6,
        }
    }

    /// Returns true if `addr` falls inside this range.
    ///
    /// An address of the other family never matches, including IPv4-mapped
    /// IPv6 addresses tested against an IPv4 range.
    pub fn contains(&self, addr: &IpAddr) -> bool {
        self.net.contains(addr)
    }
}

impl FromStr for NetworkPrefix {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let net = IpNet::from_str(s).map_err(|source| ConfigError::InvalidCidr {
            literal: s.to_string(),
            source,
        })?;
        Ok(Self { net: net.trunc() })
    }
}

impl From<IpNet> for NetworkPrefix {
    fn from(net: IpNet) -> Self {
        Self { net: net.trunc() }
    }
}

impl fmt::Display for NetworkPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.net)
    }
}
