//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use crate::history::HistoryMode;

/// Environment variable carrying the deployment base prefix.
pub const BASE_URL_ENV: &str = "BASE_URL";

/// Root configuration for the router.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// URL handling mode (`history` or `hash`).
    pub mode: HistoryMode,

    /// Base prefix the application is served under (e.g. "/app/").
    pub base: String,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            mode: HistoryMode::History,
            base: "/".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl RouterConfig {
    /// Defaults plus the `BASE_URL` override.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_base_override(std::env::var(BASE_URL_ENV).ok());
        config
    }

    /// Replace the base with `value` when it is set and non-blank.
    pub fn apply_base_override(&mut self, value: Option<String>) {
        if let Some(base) = value.filter(|v| !v.trim().is_empty()) {
            tracing::debug!(base = %base, "Base path taken from environment");
            self.base = base;
        }
    }
}
