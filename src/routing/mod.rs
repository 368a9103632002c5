//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation request (path, name, or browser URL)
//!     → router.rs (base/mode translation, duplicate check)
//!     → table.rs (route lookup)
//!     → matcher.rs (evaluate path condition)
//!     → record.rs / lazy.rs (resolve view, fetching deferred ones)
//!     → Return: committed Route or NavigationError
//!
//! Route Compilation (at startup):
//!     RouteRecord[]
//!     → Validate paths and names
//!     → Compile matchers
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex (literal paths only)
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order)

pub mod error;
pub mod lazy;
pub mod matcher;
pub mod record;
pub mod router;
pub mod table;

pub use error::{LoadError, NavigationError, TableError};
pub use lazy::{LazyView, LoadState};
pub use matcher::{BasePath, Location};
pub use record::{Component, RouteInfo, RouteRecord};
pub use router::{Route, Router};
pub use table::RouteTable;
