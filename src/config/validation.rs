//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and header names
//! - Check every trusted proxy entry, not just the first
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderName;

use crate::config::schema::ServiceConfig;
use crate::trust::{NetworkPrefix, Preset};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),

    #[error("trust.header '{0}' is not a valid header name")]
    HeaderName(String),

    #[error("trust.trusted_proxies entry '{0}' is not a CIDR literal")]
    TrustedProxy(String),

    #[error("trust.preset 'trust_all' cannot be combined with trust.trusted_proxies")]
    TrustAllWithProxies,

    #[error("timeouts.request_secs must be greater than zero")]
    RequestTimeout,
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if HeaderName::from_bytes(config.trust.header.as_bytes()).is_err() {
        errors.push(ValidationError::HeaderName(config.trust.header.clone()));
    }

    if config.trust.preset == Some(Preset::TrustAll) && !config.trust.trusted_proxies.is_empty() {
        errors.push(ValidationError::TrustAllWithProxies);
    }

    errors.extend(
        config
            .trust
            .trusted_proxies
            .iter()
            .filter(|literal| literal.parse::<NetworkPrefix>().is_err())
            .map(|literal| ValidationError::TrustedProxy(literal.clone())),
    );

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&ServiceConfig::default()), Ok(()));
    }

    #[test]
    fn reports_every_bad_proxy() {
        let mut config = ServiceConfig::default();
        config.trust.trusted_proxies = vec!["10.0.0.0/8".into(), "error".into(), "1.2.3.4".into()];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::TrustedProxy("error".into()),
                ValidationError::TrustedProxy("1.2.3.4".into()),
            ]
        );
    }

    #[test]
    fn reports_all_problems() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "also-nowhere".into();
        config.trust.header = "bad header".into();
        config.trust.preset = Some(Preset::TrustAll);
        config.trust.trusted_proxies = vec!["10.0.0.0/8".into()];
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::TrustAllWithProxies));
        assert!(errors.contains(&ValidationError::HeaderName("bad header".into())));
    }

    #[test]
    fn metrics_address_ignored_when_disabled() {
        let mut config = ServiceConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());
    }
}
