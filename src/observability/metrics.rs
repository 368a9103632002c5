//! Metrics collection.
//!
//! # Metrics
//! - `router_navigations_total` (counter): navigations by route, outcome
//! - `router_lazy_loads_total` (counter): deferred view fetches by route, outcome
//! - `router_lazy_load_duration_seconds` (histogram): fetch latency by route
//!
//! # Design Decisions
//! - Outcome labels are the short `NavigationError::kind` strings, plus
//!   `committed` for success
//! - Route labels are route names, never raw paths (bounded cardinality)

use std::time::Instant;

use metrics::{counter, histogram};

pub fn record_navigation(route: &str, outcome: &'static str) {
    counter!(
        "router_navigations_total",
        "route" => route.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_lazy_load(route: &str, outcome: &'static str, start: Instant) {
    counter!(
        "router_lazy_loads_total",
        "route" => route.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    histogram!(
        "router_lazy_load_duration_seconds",
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}
