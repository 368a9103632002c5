//! Deferred view loading.
//!
//! # States
//! - Unresolved: loader never run, or the last run was abandoned
//! - Resolving: a fetch is in flight
//! - Resolved: view cached, every later resolve returns it immediately
//! - Failed: the last fetch failed; the next resolve fetches again
//!
//! # State Transitions
//! ```text
//! Unresolved → Resolving: first navigation to the route
//! Resolving → Resolved: loader returns a view
//! Resolving → Failed: loader returns an error
//! Failed → Resolving: next navigation to the route
//! Resolving → Unresolved: the awaiting future was dropped mid-fetch
//! ```
//!
//! # Design Decisions
//! - The cache is a `tokio::sync::OnceCell`: concurrent first visits wait
//!   on the same in-flight fetch instead of starting their own
//! - Failures are not cached and never retried inside one resolve

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Instant;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde::Serialize;
use tokio::sync::OnceCell;

use crate::observability::metrics;
use crate::routing::error::LoadError;
use crate::view::ViewRef;

/// Future returned by a loader.
pub type LoadFuture = BoxFuture<'static, Result<ViewRef, LoadError>>;

/// Asynchronous factory producing the deferred view.
pub type Loader = Arc<dyn Fn() -> LoadFuture + Send + Sync>;

/// Load state of a deferred view.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Unresolved = 0,
    Resolving = 1,
    Resolved = 2,
    Failed = 3,
}

impl From<u8> for LoadState {
    fn from(val: u8) -> Self {
        match val {
            1 => LoadState::Resolving,
            2 => LoadState::Resolved,
            3 => LoadState::Failed,
            _ => LoadState::Unresolved,
        }
    }
}

/// A view fetched on first use and cached afterwards.
pub struct LazyView {
    loader: Loader,
    cell: OnceCell<ViewRef>,
    state: AtomicU8,
}

impl LazyView {
    /// Create a deferred view from an async factory.
    pub fn new<F, Fut>(loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ViewRef, LoadError>> + Send + 'static,
    {
        Self {
            loader: Arc::new(move || loader().boxed()),
            cell: OnceCell::new(),
            state: AtomicU8::new(LoadState::Unresolved as u8),
        }
    }

    pub fn state(&self) -> LoadState {
        LoadState::from(self.state.load(Ordering::Acquire))
    }

    /// The cached view, if a fetch has already succeeded.
    pub fn cached(&self) -> Option<ViewRef> {
        self.cell.get().cloned()
    }

    /// Return the cached view or run the loader once to obtain it.
    pub async fn resolve(&self, route: &str) -> Result<ViewRef, LoadError> {
        if let Some(view) = self.cell.get() {
            return Ok(view.clone());
        }

        let view = self
            .cell
            .get_or_try_init(|| self.fetch(route))
            .await?;
        Ok(view.clone())
    }

    async fn fetch(&self, route: &str) -> Result<ViewRef, LoadError> {
        let mut guard = ResolvingGuard::enter(&self.state);
        let start = Instant::now();
        tracing::debug!(route = %route, "Fetching deferred view");

        match (self.loader)().await {
            Ok(view) => {
                guard.finish(LoadState::Resolved);
                metrics::record_lazy_load(route, "resolved", start);
                tracing::info!(
                    route = %route,
                    view = %view.name(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Deferred view loaded"
                );
                Ok(view)
            }
            Err(e) => {
                guard.finish(LoadState::Failed);
                metrics::record_lazy_load(route, "failed", start);
                tracing::warn!(route = %route, error = %e, "Deferred view failed to load");
                Err(e)
            }
        }
    }
}

impl fmt::Debug for LazyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyView")
            .field("state", &self.state())
            .field("cached", &self.cell.get())
            .finish()
    }
}

/// Marks a fetch in flight; falls back to `Unresolved` if dropped early.
struct ResolvingGuard<'a> {
    state: &'a AtomicU8,
    done: bool,
}

impl<'a> ResolvingGuard<'a> {
    fn enter(state: &'a AtomicU8) -> Self {
        state.store(LoadState::Resolving as u8, Ordering::Release);
        Self { state, done: false }
    }

    fn finish(&mut self, outcome: LoadState) {
        self.state.store(outcome as u8, Ordering::Release);
        self.done = true;
    }
}

impl Drop for ResolvingGuard<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.state.store(LoadState::Unresolved as u8, Ordering::Release);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::StaticView;
    use std::sync::atomic::AtomicUsize;

    fn counting_view(calls: Arc<AtomicUsize>) -> LazyView {
        LazyView::new(move || {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(StaticView::new("About").shared())
            }
        })
    }

    #[tokio::test]
    async fn test_resolves_once_and_caches() {
        let calls = Arc::new(AtomicUsize::new(0));
        let lazy = counting_view(calls.clone());
        assert_eq!(lazy.state(), LoadState::Unresolved);
        assert!(lazy.cached().is_none());

        let first = lazy.resolve("About").await.unwrap();
        let second = lazy.resolve("About").await.unwrap();

        assert_eq!(first.name(), "About");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(lazy.state(), LoadState::Resolved);
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let a = attempts.clone();
        let lazy = LazyView::new(move || {
            let a = a.clone();
            async move {
                if a.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(LoadError::Network("connection reset".into()))
                } else {
                    Ok(StaticView::new("About").shared())
                }
            }
        });

        let err = lazy.resolve("About").await.unwrap_err();
        assert_eq!(err, LoadError::Network("connection reset".into()));
        assert_eq!(lazy.state(), LoadState::Failed);

        // Next visit fetches again
        let view = lazy.resolve("About").await.unwrap();
        assert_eq!(view.name(), "About");
        assert_eq!(lazy.state(), LoadState::Resolved);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_first_visits_share_fetch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let lazy = Arc::new(counting_view(calls.clone()));

        let (a, b) = tokio::join!(lazy.resolve("About"), lazy.resolve("About"));
        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dropped_fetch_returns_to_unresolved() {
        let gate = Arc::new(tokio::sync::Notify::new());
        let g = gate.clone();
        let lazy = LazyView::new(move || {
            let g = g.clone();
            async move {
                g.notified().await;
                Ok(StaticView::new("About").shared())
            }
        });

        let pending = lazy.resolve("About");
        let timed_out = tokio::time::timeout(std::time::Duration::from_millis(20), pending).await;
        assert!(timed_out.is_err());
        assert_eq!(lazy.state(), LoadState::Unresolved);
    }
}
