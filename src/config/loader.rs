//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ServiceConfig, LoadError> {
    let config: ServiceConfig = toml::from_str(content)?;
    validate_config(&config).map_err(LoadError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServiceConfig, LoadError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [trust]
            preset = "private"
            header = "x-real-forwarded-for"
            "#,
        )
        .unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.trust.header, "x-real-forwarded-for");
    }

    #[test]
    fn parse_rejects_bad_toml() {
        let err = parse_config("[trust\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn parse_rejects_unknown_preset() {
        let err = parse_config("[trust]\npreset = \"everyone\"\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn validation_errors_are_joined() {
        let err = parse_config("[trust]\ntrusted_proxies = [\"a\", \"b\"]\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: trust.trusted_proxies entry 'a' is not a CIDR literal, \
             trust.trusted_proxies entry 'b' is not a CIDR literal"
        );
    }

    #[test]
    fn load_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn load_from_disk() {
        let path = std::env::temp_dir().join(format!("xff-resolver-load-{}.toml", std::process::id()));
        fs::write(&path, "[trust]\ntrusted_proxies = [\"10.0.0.0/8\"]\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.trust.trusted_proxies, vec!["10.0.0.0/8"]);

        fs::remove_file(&path).unwrap();
    }
}
