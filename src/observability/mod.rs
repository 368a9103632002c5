//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router, table builder and lazy loader produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters and histograms via `metrics`)
//!
//! Consumers:
//!     → stderr (fmt subscriber, installed by the binary)
//!     → whatever `metrics` recorder the host installs
//! ```
//!
//! # Design Decisions
//! - The library only emits; installing a subscriber or recorder is the
//!   host's choice
//! - Metric updates are no-ops when no recorder is installed

pub mod logging;
pub mod metrics;
