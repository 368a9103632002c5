//! Route table builder for the drone console application.
//!
//! | path         | name       | component             |
//! |--------------|------------|-----------------------|
//! | `/`          | `Home`     | Home                  |
//! | `/about`     | `About`    | About (deferred)      |
//! | `/ping`      | `Ping`     | Ping                  |
//! | `/drone_pos` | `DronePos` | DronePos              |
//! | `/plot`      | `Plot`     | Plot                  |
//!
//! The router is built once at startup and handed to the shell; there is no
//! global instance.

pub mod views;

use std::future::Future;

use crate::config::RouterConfig;
use crate::routing::{LoadError, RouteRecord, RouteTable, Router, TableError};
use crate::view::ViewRef;

/// The application's route records, in match order.
pub fn routes<F, Fut>(about_loader: F) -> Vec<RouteRecord>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ViewRef, LoadError>> + Send + 'static,
{
    vec![
        RouteRecord::new("/", "Home", views::HOME.shared()),
        RouteRecord::lazy("/about", "About", about_loader),
        RouteRecord::new("/ping", "Ping", views::PING.shared()),
        RouteRecord::new("/drone_pos", "DronePos", views::DRONE_POS.shared()),
        RouteRecord::new("/plot", "Plot", views::PLOT.shared()),
    ]
}

/// Build the navigation controller with a custom About loader.
pub fn build_router<F, Fut>(config: &RouterConfig, about_loader: F) -> Result<Router, TableError>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ViewRef, LoadError>> + Send + 'static,
{
    let table = RouteTable::new(routes(about_loader))?;
    let router = Router::from_config(table, config);
    tracing::info!(
        routes = router.table().len(),
        mode = ?router.mode(),
        base = %router.base(),
        "Router built"
    );
    Ok(router)
}

/// Build the navigation controller with the bundled About loader.
pub fn build_default_router(config: &RouterConfig) -> Result<Router, TableError> {
    build_router(config, views::load_about)
}
