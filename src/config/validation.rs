//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Base prefix must not carry a query or fragment (a missing leading
//!   '/' is added when the router normalises it)
//! - Log level must be one `tracing` understands
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::RouterConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("base `{0}` must not contain '?' or '#'")]
    BaseWithQueryOrFragment(String),

    #[error("unknown log level `{0}`")]
    UnknownLogLevel(String),
}

pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.base.contains(['?', '#']) {
        errors.push(ValidationError::BaseWithQueryOrFragment(config.base.clone()));
    }
    if !LOG_LEVELS.contains(&config.log_level.to_lowercase().as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
