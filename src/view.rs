//! View abstraction.
//!
//! The router never renders anything itself. A view is an opaque renderable
//! unit identified by its name; the application shell decides what to do
//! with it once a navigation commits.

use std::fmt;
use std::sync::Arc;

/// A renderable view the router can bind a path to.
pub trait View: Send + Sync + fmt::Debug {
    /// Component name, e.g. `"Home"`.
    fn name(&self) -> &str;
}

/// Shared handle to a view.
pub type ViewRef = Arc<dyn View>;

/// A view that carries nothing but its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticView {
    name: &'static str,
}

impl StaticView {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// Wrap into a shared [`ViewRef`].
    pub fn shared(self) -> ViewRef {
        Arc::new(self)
    }
}

impl View for StaticView {
    fn name(&self) -> &str {
        self.name
    }
}
