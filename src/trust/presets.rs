//! Named trust configurations.
//!
//! Presets are plain values. They are built into a [`TrustSet`] once at
//! startup and passed to the resolver like any other configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::trust::{ConfigError, TrustSet};

const LOOPBACK: &[&str] = &["127.0.0.0/8", "::1/128"];

const PRIVATE: &[&str] = &[
    "127.0.0.0/8",
    "10.0.0.0/8",
    "172.16.0.0/12",
    "192.168.0.0/16",
    "169.254.0.0/16",
    "::1/128",
    "fc00::/7",
    "fe80::/10",
];

/// A named set of trusted ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// No ranges: every hop is trusted. This is the default.
    #[default]
    TrustAll,
    /// IPv4 and IPv6 loopback only.
    Loopback,
    /// Loopback, RFC 1918, link-local and unique-local ranges.
    Private,
}

impl Preset {
    /// CIDR literals making up this preset.
    pub fn cidrs(&self) -> &'static [&'static str] {
        match self {
            Preset::TrustAll => &[],
            Preset::Loopback => LOOPBACK,
            Preset::Private => PRIVATE,
        }
    }

    pub fn trust_set(&self) -> Result<TrustSet, ConfigError> {
        TrustSet::build(self.cidrs())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::TrustAll => "trust_all",
            Preset::Loopback => "loopback",
            Preset::Private => "private",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unknown preset name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preset '{0}', expected one of: trust_all, loopback, private")]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "trust_all" => Ok(Preset::TrustAll),
            "loopback" => Ok(Preset::Loopback),
            "private" => Ok(Preset::Private),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}
