//! Route records: path-to-view bindings with a symbolic name.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use serde::Serialize;

use crate::routing::error::{LoadError, NavigationError};
use crate::routing::lazy::{LazyView, LoadState};
use crate::view::ViewRef;

/// The view bound to a route.
#[derive(Clone)]
pub enum Component {
    /// Available at build time.
    Eager(ViewRef),
    /// Fetched on first navigation, then cached.
    Lazy(Arc<LazyView>),
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Eager(view) => f.debug_tuple("Eager").field(&view.name()).finish(),
            Component::Lazy(lazy) => f.debug_tuple("Lazy").field(lazy).finish(),
        }
    }
}

/// A single declared route.
#[derive(Debug, Clone)]
pub struct RouteRecord {
    pub path: String,
    pub name: String,
    pub component: Component,
}

impl RouteRecord {
    /// Bind a path to a view that is available immediately.
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: ViewRef) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            component: Component::Eager(view),
        }
    }

    /// Bind a path to a view produced by an async factory on first visit.
    pub fn lazy<F, Fut>(path: impl Into<String>, name: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ViewRef, LoadError>> + Send + 'static,
    {
        Self {
            path: path.into(),
            name: name.into(),
            component: Component::Lazy(Arc::new(LazyView::new(loader))),
        }
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self.component, Component::Lazy(_))
    }

    /// The view if it can be produced without waiting.
    pub fn ready_view(&self) -> Option<ViewRef> {
        match &self.component {
            Component::Eager(view) => Some(view.clone()),
            Component::Lazy(lazy) => lazy.cached(),
        }
    }

    /// Produce the view, fetching it first if this is a deferred route.
    pub async fn resolve_view(&self) -> Result<ViewRef, NavigationError> {
        match &self.component {
            Component::Eager(view) => Ok(view.clone()),
            Component::Lazy(lazy) => lazy
                .resolve(&self.name)
                .await
                .map_err(|source| NavigationError::LoadFailed {
                    route: self.name.clone(),
                    source,
                }),
        }
    }

    /// Serializable summary for introspection.
    pub fn info(&self) -> RouteInfo {
        let (lazy, state) = match &self.component {
            Component::Eager(_) => (false, LoadState::Resolved),
            Component::Lazy(lazy) => (true, lazy.state()),
        };
        RouteInfo {
            path: self.path.clone(),
            name: self.name.clone(),
            lazy,
            state,
        }
    }
}

/// Introspection view of a [`RouteRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub path: String,
    pub name: String,
    pub lazy: bool,
    pub state: LoadState,
}
