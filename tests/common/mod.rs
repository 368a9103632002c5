//! Shared loaders and builders for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;
use view_router::app::{self, views};
use view_router::routing::LoadError;
use view_router::{Router, RouterConfig, ViewRef};

/// Router with the bundled About loader at the given base.
pub fn router_at(base: &str) -> Router {
    let config = RouterConfig {
        base: base.to_string(),
        ..RouterConfig::default()
    };
    app::build_default_router(&config).unwrap()
}

/// Router whose About loader always fails with a network error.
#[allow(dead_code)]
pub fn offline_router() -> Router {
    app::build_router(&RouterConfig::default(), || async {
        Err::<ViewRef, _>(LoadError::Network("connection refused".into()))
    })
    .unwrap()
}

/// About loader that counts calls and blocks until released.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct GatedLoader {
    pub calls: Arc<AtomicUsize>,
    pub gate: Arc<Notify>,
}

#[allow(dead_code)]
impl GatedLoader {
    pub fn router(&self) -> Router {
        let loader = self.clone();
        app::build_router(&RouterConfig::default(), move || {
            let loader = loader.clone();
            async move {
                loader.calls.fetch_add(1, Ordering::SeqCst);
                loader.gate.notified().await;
                Ok(views::ABOUT.shared())
            }
        })
        .unwrap()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}
