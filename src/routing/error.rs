//! Routing error types.

use thiserror::Error;

/// Failure to fetch a deferred view module.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("network error: {0}")]
    Network(String),

    #[error("module `{0}` not found")]
    NotFound(String),
}

/// A rejected navigation.
///
/// Every variant is a recoverable outcome: the current route is left as it
/// was before the navigation started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("no route matches `{path}`")]
    NoMatch { path: String },

    #[error("no route named `{name}`")]
    UnknownName { name: String },

    #[error("failed to load view for route `{route}`: {source}")]
    LoadFailed {
        route: String,
        #[source]
        source: LoadError,
    },

    #[error("already at `{path}`")]
    Duplicated { path: String },

    #[error("navigation to `{path}` superseded by a newer navigation")]
    Superseded { path: String },

    #[error("`{url}` is outside base `{base}`")]
    OutsideBase { url: String, base: String },

    #[error("no history entry at offset {delta}")]
    OutOfHistory { delta: isize },

    #[error("invalid URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl NavigationError {
    /// Short label used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            NavigationError::NoMatch { .. } => "no_match",
            NavigationError::UnknownName { .. } => "unknown_name",
            NavigationError::LoadFailed { .. } => "load_failed",
            NavigationError::Duplicated { .. } => "duplicated",
            NavigationError::Superseded { .. } => "superseded",
            NavigationError::OutsideBase { .. } => "outside_base",
            NavigationError::OutOfHistory { .. } => "out_of_history",
            NavigationError::InvalidUrl { .. } => "invalid_url",
        }
    }
}

/// Route table construction failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("duplicate route path `{0}`")]
    DuplicatePath(String),

    #[error("duplicate route name `{0}`")]
    DuplicateName(String),

    #[error("malformed route path `{0}`: must start with '/' and contain no '?', '#' or whitespace")]
    MalformedPath(String),

    #[error("route name must not be empty (path `{0}`)")]
    EmptyName(String),
}
