//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the `tracing` subscriber for the binary
//! - Configure log level from `RUST_LOG` or the config file
//!
//! # Design Decisions
//! - Installed before configuration loads, at the default level, so config
//!   events are not lost; the configured level is applied afterwards
//! - `RUST_LOG` wins over the configured level when both are set
//! - Logs go to stderr so stdout stays machine-readable

use tracing_subscriber::{
    layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Filter directive used when `RUST_LOG` is not set.
pub fn default_directive(level: &str) -> String {
    format!("view_router={}", level.to_lowercase())
}

/// Handle to the installed subscriber's filter.
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogHandle {
    /// Switch to the configured level unless `RUST_LOG` took precedence.
    pub fn set_level(&self, level: &str) {
        if self.from_env {
            return;
        }
        if let Err(e) = self.filter.reload(EnvFilter::new(default_directive(level))) {
            tracing::warn!(error = %e, "Failed to apply configured log level");
        }
    }
}

/// Install the global subscriber.
///
/// Returns `None` if a subscriber was already installed.
pub fn init(level: &str) -> Option<LogHandle> {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(default_directive(level)), false),
    };
    let (filter, handle) = reload::Layer::new(filter);

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    match result {
        Ok(()) => Some(LogHandle {
            filter: handle,
            from_env,
        }),
        Err(_) => {
            tracing::debug!("Tracing subscriber already installed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive("DEBUG"), "view_router=debug");
    }

    #[test]
    fn test_init_twice() {
        let first = init("info");
        assert!(init("debug").is_none());
        if let Some(handle) = first {
            handle.set_level("trace");
        }
    }
}
