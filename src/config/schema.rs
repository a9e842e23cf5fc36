//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::resolver::PeerPolicy;
use crate::trust::{ConfigError, Preset, TrustSet};

/// Root configuration for the resolver service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Trusted proxy configuration.
    pub trust: TrustConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Which hops are believed when walking the forwarded header.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TrustConfig {
    /// Named range set added before `trusted_proxies`.
    pub preset: Option<Preset>,

    /// CIDR literals of trusted proxies. Empty (with no preset) trusts all hops.
    pub trusted_proxies: Vec<String>,

    /// Header carrying the forwarded chain.
    pub header: String,

    /// Only read the header when the connecting peer is itself trusted.
    pub require_trusted_peer: bool,

    /// Replace the connection's peer address with the resolved client address.
    pub rewrite_connect_info: bool,
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            preset: None,
            trusted_proxies: Vec::new(),
            header: "x-forwarded-for".to_string(),
            require_trusted_peer: false,
            rewrite_connect_info: true,
        }
    }
}

impl TrustConfig {
    /// All CIDR literals in effect: preset ranges first, then explicit ones.
    pub fn cidrs(&self) -> Vec<&str> {
        let preset = self.preset.map(|p| p.cidrs()).unwrap_or_default();
        preset
            .iter()
            .copied()
            .chain(self.trusted_proxies.iter().map(String::as_str))
            .collect()
    }

    /// Build the trust set this configuration describes.
    pub fn trust_set(&self) -> Result<TrustSet, ConfigError> {
        TrustSet::build(self.cidrs())
    }

    pub fn peer_policy(&self) -> PeerPolicy {
        if self.require_trusted_peer {
            PeerPolicy::Trusted
        } else {
            PeerPolicy::Any
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
