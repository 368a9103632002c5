//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{RouterConfig, BASE_URL_ENV};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load a TOML file, apply the `BASE_URL` override and validate.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, std::env::var(BASE_URL_ENV).ok())
}

/// Parse and validate TOML content with an explicit base override.
pub fn parse_config(content: &str, base_override: Option<String>) -> Result<RouterConfig, ConfigError> {
    let mut config: RouterConfig = toml::from_str(content)?;
    config.apply_base_override(base_override);

    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::info!(
        mode = ?config.mode,
        base = %config.base,
        "Configuration loaded"
    );
    Ok(config)
}

/// Validate a config assembled without a file (defaults + environment).
pub fn finalize(config: RouterConfig) -> Result<RouterConfig, ConfigError> {
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
