//! The application's views, as the router sees them.

use crate::routing::LoadError;
use crate::view::{StaticView, ViewRef};

pub const HOME: StaticView = StaticView::new("Home");
pub const ABOUT: StaticView = StaticView::new("About");
pub const PING: StaticView = StaticView::new("Ping");
pub const DRONE_POS: StaticView = StaticView::new("DronePos");
pub const PLOT: StaticView = StaticView::new("Plot");

/// Default loader for the code-split About view.
///
/// Yields once before producing the view so the fetch is a real suspension
/// point, like a chunk download.
pub async fn load_about() -> Result<ViewRef, LoadError> {
    tokio::task::yield_now().await;
    Ok(ABOUT.shared())
}
