//! Navigation controller.
//!
//! # Responsibilities
//! - Translate browser URLs to route-relative locations (base + mode)
//! - Look up the matching route record
//! - Resolve its view, awaiting the fetch for deferred routes
//! - Commit the result to history and expose the current route
//!
//! # Design Decisions
//! - The route table is immutable; only navigation state is mutable and it
//!   sits behind a mutex that is never held across an await
//! - A navigation that finishes after a newer one has committed is
//!   rejected as superseded; its fetched view stays cached
//! - Failed navigations leave the current route untouched
//! - No fallback route: an unmatched path is reported, not redirected

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use percent_encoding::percent_decode_str;

use crate::config::RouterConfig;
use crate::history::{History, HistoryMode, MemoryHistory};
use crate::observability::metrics;
use crate::routing::error::NavigationError;
use crate::routing::matcher::{BasePath, Location};
use crate::routing::record::{RouteInfo, RouteRecord};
use crate::routing::table::RouteTable;
use crate::view::ViewRef;

/// A committed (or committable) match: record plus resolved view.
#[derive(Debug, Clone)]
pub struct Route {
    /// Symbolic name of the matched record.
    pub name: String,
    /// Declared path of the matched record.
    pub path: String,
    /// The location that was navigated to, query included.
    pub location: Location,
    pub view: ViewRef,
}

impl Route {
    pub fn view_name(&self) -> &str {
        self.view.name()
    }

    pub fn full_path(&self) -> String {
        self.location.full_path()
    }
}

#[derive(Debug, Clone, Copy)]
enum Commit {
    Push,
    Replace,
    Go(isize),
}

#[derive(Debug)]
struct NavState {
    history: Box<dyn History>,
    current: Option<Route>,
    /// Id of the last committed navigation.
    committed: u64,
}

/// Matches URL changes to route records and tracks the current route.
#[derive(Debug)]
pub struct Router {
    table: RouteTable,
    base: BasePath,
    mode: HistoryMode,
    next_id: AtomicU64,
    state: Mutex<NavState>,
}

impl Router {
    /// Router at base `/` in history mode with an in-memory history.
    pub fn new(table: RouteTable) -> Self {
        Self {
            table,
            base: BasePath::default(),
            mode: HistoryMode::default(),
            next_id: AtomicU64::new(0),
            state: Mutex::new(NavState {
                history: Box::new(MemoryHistory::new()),
                current: None,
                committed: 0,
            }),
        }
    }

    /// Router configured with the mode and base from `config`.
    pub fn from_config(table: RouteTable, config: &RouterConfig) -> Self {
        Self::new(table).with_mode(config.mode).with_base(&config.base)
    }

    pub fn with_base(mut self, base: &str) -> Self {
        self.base = BasePath::new(base);
        self
    }

    pub fn with_mode(mut self, mode: HistoryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the history backend. Must be called before navigating.
    pub fn with_history(mut self, history: Box<dyn History>) -> Self {
        self.state_mut().history = history;
        self
    }

    pub fn base(&self) -> &BasePath {
        &self.base
    }

    pub fn mode(&self) -> HistoryMode {
        self.mode
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Summaries of every route, in declaration order.
    pub fn routes(&self) -> Vec<RouteInfo> {
        self.table.iter().map(|record| record.info()).collect()
    }

    /// The last committed route, if any navigation has succeeded.
    pub fn current_route(&self) -> Option<Route> {
        self.state().current.clone()
    }

    pub fn history_len(&self) -> usize {
        self.state().history.len()
    }

    /// Look up the record for a route-relative target without navigating.
    pub fn resolve(&self, target: &str) -> Option<&Arc<RouteRecord>> {
        self.table.match_path(&Location::parse(target).path)
    }

    /// Look up the record for a browser URL, honouring base and mode.
    pub fn match_url(&self, url: &str) -> Result<(Location, Arc<RouteRecord>), NavigationError> {
        let location = self.location_from_url(url)?;
        let record = self
            .table
            .match_path(&location.path)
            .cloned()
            .ok_or_else(|| NavigationError::NoMatch {
                path: location.full_path(),
            })?;
        Ok((location, record))
    }

    /// Convert a browser URL into a route-relative location.
    ///
    /// Accepts absolute URLs (`https://host/app/ping?x=1`) and path-only
    /// URLs (`/app/ping`).
    pub fn location_from_url(&self, url: &str) -> Result<Location, NavigationError> {
        let parts = UrlParts::split(url)?;
        let relative = self
            .base
            .strip(&parts.path)
            .ok_or_else(|| NavigationError::OutsideBase {
                url: url.to_string(),
                base: self.base.to_string(),
            })?;

        Ok(match self.mode {
            HistoryMode::History => Location {
                path: relative,
                query: parts.query,
            },
            HistoryMode::Hash => Location::parse(parts.fragment.as_deref().unwrap_or("/")),
        })
    }

    /// Browser URL for a route-relative target.
    pub fn href(&self, target: &str) -> String {
        let location = Location::parse(target);
        match self.mode {
            HistoryMode::History => self.base.join(&location.full_path()),
            HistoryMode::Hash => format!("{}#{}", self.base, location.full_path()),
        }
    }

    /// Browser URL for a named route.
    pub fn href_named(&self, name: &str) -> Result<String, NavigationError> {
        let record = self.named(name)?;
        Ok(self.href(&record.path))
    }

    /// Handle the URL the application was opened with (deep link).
    pub async fn start(&self, url: &str) -> Result<Route, NavigationError> {
        tracing::debug!(url = %url, "Starting router from initial URL");
        let location = self.location_from_url(url)?;
        self.navigate(location, Commit::Replace).await
    }

    /// Navigate to a route-relative path, adding a history entry.
    pub async fn push(&self, target: &str) -> Result<Route, NavigationError> {
        self.navigate(Location::parse(target), Commit::Push).await
    }

    /// Navigate to a route-relative path, overwriting the current entry.
    pub async fn replace(&self, target: &str) -> Result<Route, NavigationError> {
        self.navigate(Location::parse(target), Commit::Replace).await
    }

    /// Navigate to the route declared under `name`.
    pub async fn push_named(&self, name: &str) -> Result<Route, NavigationError> {
        let location = Location::parse(&self.named(name)?.path);
        self.navigate(location, Commit::Push).await
    }

    pub async fn back(&self) -> Result<Route, NavigationError> {
        self.go(-1).await
    }

    pub async fn forward(&self) -> Result<Route, NavigationError> {
        self.go(1).await
    }

    /// Move `delta` entries through history.
    pub async fn go(&self, delta: isize) -> Result<Route, NavigationError> {
        let location = self
            .state()
            .history
            .peek(delta)
            .cloned()
            .ok_or(NavigationError::OutOfHistory { delta })?;
        self.navigate(location, Commit::Go(delta)).await
    }

    fn named(&self, name: &str) -> Result<&Arc<RouteRecord>, NavigationError> {
        self.table
            .get(name)
            .ok_or_else(|| NavigationError::UnknownName {
                name: name.to_string(),
            })
    }

    async fn navigate(&self, location: Location, commit: Commit) -> Result<Route, NavigationError> {
        let Some(record) = self.table.match_path(&location.path).cloned() else {
            let err = NavigationError::NoMatch {
                path: location.full_path(),
            };
            return Err(reject("none", err));
        };

        match self.navigate_to(&record, location, commit).await {
            Ok(route) => {
                metrics::record_navigation(&route.name, "committed");
                tracing::info!(
                    route = %route.name,
                    path = %route.full_path(),
                    view = %route.view_name(),
                    "Navigation committed"
                );
                Ok(route)
            }
            Err(e) => Err(reject(&record.name, e)),
        }
    }

    async fn navigate_to(
        &self,
        record: &RouteRecord,
        location: Location,
        commit: Commit,
    ) -> Result<Route, NavigationError> {
        check_duplicate(&self.state(), &location, commit)?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(id, route = %record.name, path = %location, "Navigation started");

        let view = record.resolve_view().await?;

        let mut state = self.state();
        if state.committed > id {
            return Err(NavigationError::Superseded {
                path: location.full_path(),
            });
        }
        check_duplicate(&state, &location, commit)?;

        match commit {
            Commit::Push => state.history.push(location.clone()),
            Commit::Replace => state.history.replace(location.clone()),
            Commit::Go(delta) => {
                if !state.history.go(delta) {
                    return Err(NavigationError::OutOfHistory { delta });
                }
            }
        }

        let route = Route {
            name: record.name.clone(),
            path: record.path.clone(),
            location,
            view,
        };
        state.current = Some(route.clone());
        state.committed = id;
        Ok(route)
    }

    fn state(&self) -> MutexGuard<'_, NavState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&mut self) -> &mut NavState {
        self.state.get_mut().unwrap_or_else(PoisonError::into_inner)
    }
}

/// History moves may revisit the current location; pushes and replaces may not.
fn check_duplicate(state: &NavState, location: &Location, commit: Commit) -> Result<(), NavigationError> {
    if matches!(commit, Commit::Go(_)) {
        return Ok(());
    }
    if state.current.as_ref().map(|c| &c.location) == Some(location) {
        return Err(NavigationError::Duplicated {
            path: location.full_path(),
        });
    }
    Ok(())
}

fn reject(route: &str, err: NavigationError) -> NavigationError {
    metrics::record_navigation(route, err.kind());
    tracing::warn!(route = %route, reason = err.kind(), error = %err, "Navigation rejected");
    err
}

/// Path, query and fragment of a browser URL.
struct UrlParts {
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl UrlParts {
    fn split(raw: &str) -> Result<Self, NavigationError> {
        if raw.contains("://") {
            let url = url::Url::parse(raw).map_err(|e| NavigationError::InvalidUrl {
                url: raw.to_string(),
                reason: e.to_string(),
            })?;
            return Ok(Self {
                path: decode_path(raw, url.path())?,
                query: url.query().filter(|q| !q.is_empty()).map(str::to_string),
                fragment: url.fragment().map(str::to_string),
            });
        }

        if !raw.starts_with('/') {
            return Err(NavigationError::InvalidUrl {
                url: raw.to_string(),
                reason: "expected an absolute URL or a path starting with '/'".to_string(),
            });
        }

        let (rest, fragment) = match raw.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (raw, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string()).filter(|q| !q.is_empty())),
            None => (rest, None),
        };
        Ok(Self {
            path: decode_path(raw, path)?,
            query,
            fragment,
        })
    }
}

/// Percent-decode a URL path before matching.
fn decode_path(raw: &str, path: &str) -> Result<String, NavigationError> {
    percent_decode_str(path)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| NavigationError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("path is not valid UTF-8 once decoded: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::error::LoadError;
    use crate::view::StaticView;
    use futures_util::FutureExt;

    fn table() -> RouteTable {
        RouteTable::new(vec![
            RouteRecord::new("/", "Home", StaticView::new("Home").shared()),
            RouteRecord::new("/ping", "Ping", StaticView::new("Ping").shared()),
            RouteRecord::new("/plot", "Plot", StaticView::new("Plot").shared()),
        ])
        .unwrap()
    }

    #[test]
    fn test_eager_navigation_completes_without_waiting() {
        let router = Router::new(table());
        let route = router.push("/ping").now_or_never().unwrap().unwrap();
        assert_eq!(route.view_name(), "Ping");
        assert_eq!(router.current_route().unwrap().name, "Ping");
    }

    #[tokio::test]
    async fn test_no_match_leaves_state_untouched() {
        let router = Router::new(table());
        router.push("/").await.unwrap();

        let err = router.push("/nowhere").await.unwrap_err();
        assert_eq!(err, NavigationError::NoMatch { path: "/nowhere".into() });
        assert_eq!(router.current_route().unwrap().name, "Home");
        assert_eq!(router.history_len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_navigation() {
        let router = Router::new(table());
        router.push("/plot").await.unwrap();

        let err = router.push("/plot/").await.unwrap_err();
        assert_eq!(err, NavigationError::Duplicated { path: "/plot".into() });

        // A different query is a different location
        let route = router.push("/plot?range=5").await.unwrap();
        assert_eq!(route.location.query.as_deref(), Some("range=5"));
    }

    #[tokio::test]
    async fn test_back_and_forward() {
        let router = Router::new(table());
        router.push("/").await.unwrap();
        router.push("/ping").await.unwrap();
        router.push("/plot").await.unwrap();

        assert_eq!(router.back().await.unwrap().name, "Ping");
        assert_eq!(router.go(-1).await.unwrap().name, "Home");
        assert_eq!(
            router.back().await.unwrap_err(),
            NavigationError::OutOfHistory { delta: -1 }
        );
        assert_eq!(router.forward().await.unwrap().name, "Ping");
        assert_eq!(router.history_len(), 3);
    }

    #[tokio::test]
    async fn test_replace_does_not_grow_history() {
        let router = Router::new(table());
        router.push("/").await.unwrap();
        router.replace("/ping").await.unwrap();
        assert_eq!(router.history_len(), 1);
        assert_eq!(router.current_route().unwrap().name, "Ping");
    }

    #[tokio::test]
    async fn test_named_navigation() {
        let router = Router::new(table()).with_base("/app");
        assert_eq!(router.push_named("Plot").await.unwrap().path, "/plot");
        assert_eq!(router.href_named("Ping").unwrap(), "/app/ping");
        assert_eq!(
            router.push_named("Missing").await.unwrap_err(),
            NavigationError::UnknownName { name: "Missing".into() }
        );
    }

    #[test]
    fn test_history_mode_urls() {
        let router = Router::new(table()).with_base("/app/");
        assert_eq!(router.href("/ping"), "/app/ping");
        assert_eq!(router.href("/"), "/app/");

        let (location, record) = router.match_url("https://drone.example/app/ping?x=1").unwrap();
        assert_eq!(record.name, "Ping");
        assert_eq!(location.query.as_deref(), Some("x=1"));

        assert!(matches!(
            router.match_url("/ping"),
            Err(NavigationError::OutsideBase { .. })
        ));
        assert!(matches!(
            router.match_url("ping"),
            Err(NavigationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_hash_mode_urls() {
        let router = Router::new(table())
            .with_base("/app")
            .with_mode(HistoryMode::Hash);
        assert_eq!(router.href("/plot"), "/app/#/plot");

        let (_, record) = router.match_url("/app/#/plot").unwrap();
        assert_eq!(record.name, "Plot");
        let (_, record) = router.match_url("/app/").unwrap();
        assert_eq!(record.name, "Home");
    }

    #[tokio::test]
    async fn test_start_from_deep_link() {
        let router = Router::new(table()).with_base("/app");
        let route = router.start("http://localhost:8080/app/plot").await.unwrap();
        assert_eq!(route.name, "Plot");
        assert_eq!(router.history_len(), 1);
    }

    #[tokio::test]
    async fn test_load_failure_is_rejected_navigation() {
        let table = RouteTable::new(vec![
            RouteRecord::new("/", "Home", StaticView::new("Home").shared()),
            RouteRecord::lazy("/about", "About", || async {
                Err(LoadError::Network("offline".into()))
            }),
        ])
        .unwrap();
        let router = Router::new(table);
        router.push("/").await.unwrap();

        let err = router.push("/about").await.unwrap_err();
        assert_eq!(
            err,
            NavigationError::LoadFailed {
                route: "About".into(),
                source: LoadError::Network("offline".into()),
            }
        );
        assert_eq!(router.current_route().unwrap().name, "Home");
    }
}
