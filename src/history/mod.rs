//! History subsystem.
//!
//! # Data Flow
//! ```text
//! Browser URL (deep link, back/forward)
//!     → HistoryMode (where the route path lives: path or fragment)
//!     → Router (match + resolve)
//!     → History::push / replace / go (commit)
//! ```
//!
//! # Design Decisions
//! - `History` is the seam to the host environment; `MemoryHistory` is the
//!   in-process implementation used by the CLI and tests
//! - Entries are route-relative `Location`s; the base prefix is applied
//!   only when building hrefs

pub mod memory;

use serde::{Deserialize, Serialize};

use crate::routing::matcher::Location;

pub use memory::MemoryHistory;

/// How route paths appear in the browser URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    /// `/base/ping`: real paths, intercepted client-side.
    #[default]
    History,
    /// `/base/#/ping`: route path carried in the fragment.
    Hash,
}

/// Session history backing a router.
pub trait History: Send + std::fmt::Debug {
    /// Entry at the cursor.
    fn current(&self) -> Option<&Location>;

    /// Drop forward entries and append a new one.
    fn push(&mut self, location: Location);

    /// Overwrite the entry at the cursor (or push onto an empty history).
    fn replace(&mut self, location: Location);

    /// Entry `delta` steps from the cursor, without moving.
    fn peek(&self, delta: isize) -> Option<&Location>;

    /// Move the cursor by `delta`. Returns false if out of range.
    fn go(&mut self, delta: isize) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
