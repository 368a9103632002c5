//! Immutable route table.
//!
//! # Responsibilities
//! - Validate declared records (well-formed paths, unique paths and names)
//! - Compile one matcher per record, in declaration order
//! - Look up by path (first match wins) and by name
//!
//! # Design Decisions
//! - Immutable after construction; shared freely behind `&`
//! - O(n) path scan, O(1) name lookup via HashMap
//! - Explicit `None` on no match rather than a silent default

use std::collections::HashMap;
use std::sync::Arc;

use crate::routing::error::TableError;
use crate::routing::matcher::{match_key, ExactPathMatcher, Matcher};
use crate::routing::record::RouteRecord;

#[derive(Debug)]
struct CompiledRoute {
    matcher: ExactPathMatcher,
    record: Arc<RouteRecord>,
}

/// The ordered, validated set of routes.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
    by_name: HashMap<String, usize>,
}

impl RouteTable {
    /// Compile records in the order given.
    pub fn new(records: Vec<RouteRecord>) -> Result<Self, TableError> {
        let mut routes = Vec::with_capacity(records.len());
        let mut by_name = HashMap::with_capacity(records.len());
        let mut seen_paths = Vec::with_capacity(records.len());

        for record in records {
            if !is_well_formed(&record.path) {
                return Err(TableError::MalformedPath(record.path));
            }
            if record.name.is_empty() {
                return Err(TableError::EmptyName(record.path));
            }

            let normalized = match_key(&record.path);
            if seen_paths.contains(&normalized) {
                return Err(TableError::DuplicatePath(record.path));
            }
            if by_name.contains_key(&record.name) {
                return Err(TableError::DuplicateName(record.name));
            }

            seen_paths.push(normalized);
            by_name.insert(record.name.clone(), routes.len());
            routes.push(CompiledRoute {
                matcher: ExactPathMatcher::new(&record.path),
                record: Arc::new(record),
            });
        }

        tracing::debug!(routes = routes.len(), "Route table compiled");
        Ok(Self { routes, by_name })
    }

    /// First record whose path matches, in declaration order.
    pub fn match_path(&self, path: &str) -> Option<&Arc<RouteRecord>> {
        self.routes
            .iter()
            .find(|route| route.matcher.matches(path))
            .map(|route| &route.record)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<RouteRecord>> {
        self.by_name.get(name).map(|&i| &self.routes[i].record)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<RouteRecord>> {
        self.routes.iter().map(|route| &route.record)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn is_well_formed(path: &str) -> bool {
    path.starts_with('/') && !path.contains(['?', '#']) && !path.contains(char::is_whitespace)
}
