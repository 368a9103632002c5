//! Path matching and location parsing.
//!
//! # Responsibilities
//! - Split a navigation target into path and query
//! - Normalise paths (leading slash, no trailing slash except root)
//! - Strip and prepend the deployment base prefix
//! - Match a normalised path against a declared route path
//!
//! # Design Decisions
//! - Path matching is exact and case-insensitive, as is base stripping
//! - A single trailing slash is tolerated (`/ping/` matches `/ping`)
//! - Query strings and fragments never take part in matching
//! - No regex, no parameters: every declared path is a literal

use std::fmt;

use serde::Serialize;

/// Trait for matching a normalised path against a route condition.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches one literal path.
#[derive(Debug, Clone)]
pub struct ExactPathMatcher {
    path: String,
}

impl ExactPathMatcher {
    /// Create a new matcher. The path is normalised and lowercased first.
    pub fn new(path: impl AsRef<str>) -> Self {
        Self {
            path: match_key(path.as_ref()),
        }
    }
}

impl Matcher for ExactPathMatcher {
    fn matches(&self, path: &str) -> bool {
        match_key(path) == self.path
    }
}

/// Comparison form of a path: normalised and lowercased.
pub fn match_key(path: &str) -> String {
    normalize_path(path).to_lowercase()
}

/// Normalise a route-relative path.
///
/// Adds a leading slash and drops trailing slashes; the empty path is `/`.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// A navigation target relative to the base: path plus optional query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub path: String,
    pub query: Option<String>,
}

impl Location {
    /// Parse `"/ping?x=1#top"` style targets. The fragment is dropped.
    pub fn parse(target: &str) -> Self {
        let without_fragment = target.split('#').next().unwrap_or_default();
        let (path, query) = match without_fragment.split_once('?') {
            Some((path, query)) if !query.is_empty() => (path, Some(query.to_string())),
            Some((path, _)) => (path, None),
            None => (without_fragment, None),
        };
        Self {
            path: normalize_path(path),
            query,
        }
    }

    /// Path followed by `?query` when present.
    pub fn full_path(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.clone(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path())
    }
}

/// The deployment base prefix, always of the form `/` or `/segment/.../`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePath(String);

impl BasePath {
    pub fn new(raw: &str) -> Self {
        let inner = raw.trim().trim_matches('/');
        if inner.is_empty() {
            Self("/".to_string())
        } else {
            Self(format!("/{}/", inner))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Strip the base from a browser path.
    ///
    /// Returns the route-relative path, or `None` when the browser path is
    /// not under the base. `/app` and `/app/` both map to `/` for base
    /// `/app/`; `/application` is not under it. The prefix compares
    /// case-insensitively and the remainder keeps its casing.
    pub fn strip(&self, browser_path: &str) -> Option<String> {
        if self.is_root() {
            return Some(normalize_path(browser_path));
        }
        let bare = self.0.trim_end_matches('/');
        let head = browser_path.get(..bare.len())?;
        if head.to_lowercase() != bare.to_lowercase() {
            return None;
        }
        let rest = &browser_path[bare.len()..];
        if rest.is_empty() || rest.starts_with('/') {
            Some(normalize_path(rest))
        } else {
            None
        }
    }

    /// Prepend the base to a route-relative path.
    pub fn join(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}{}", self.0, path)
    }
}

impl Default for BasePath {
    fn default() -> Self {
        Self::new("/")
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_matcher() {
        let matcher = ExactPathMatcher::new("/ping");
        assert!(matcher.matches("/ping"));
        assert!(matcher.matches("/ping/"));
        assert!(matcher.matches("/Ping")); // Case insensitive
        assert!(matcher.matches("/PING/"));
        assert!(!matcher.matches("/ping/extra"));
        assert!(!matcher.matches("/pin"));
    }

    #[test]
    fn test_root_matcher() {
        let matcher = ExactPathMatcher::new("/");
        assert!(matcher.matches("/"));
        assert!(matcher.matches(""));
        assert!(!matcher.matches("/about"));
    }

    #[test]
    fn test_location_parse() {
        let loc = Location::parse("/plot?range=10#chart");
        assert_eq!(loc.path, "/plot");
        assert_eq!(loc.query.as_deref(), Some("range=10"));
        assert_eq!(loc.full_path(), "/plot?range=10");

        let loc = Location::parse("drone_pos/");
        assert_eq!(loc.path, "/drone_pos");
        assert_eq!(loc.query, None);

        let loc = Location::parse("/?");
        assert_eq!(loc.path, "/");
        assert_eq!(loc.query, None);
    }

    #[test]
    fn test_base_normalisation() {
        assert_eq!(BasePath::new("").as_str(), "/");
        assert_eq!(BasePath::new("/").as_str(), "/");
        assert_eq!(BasePath::new("app").as_str(), "/app/");
        assert_eq!(BasePath::new("/app").as_str(), "/app/");
        assert_eq!(BasePath::new("/app/").as_str(), "/app/");
        assert_eq!(BasePath::new("/nested/app/").as_str(), "/nested/app/");
    }

    #[test]
    fn test_base_strip() {
        let base = BasePath::new("/app/");
        assert_eq!(base.strip("/app/ping").as_deref(), Some("/ping"));
        assert_eq!(base.strip("/app/").as_deref(), Some("/"));
        assert_eq!(base.strip("/app").as_deref(), Some("/"));
        assert_eq!(base.strip("/ping"), None);
        assert_eq!(base.strip("/application"), None);
        assert_eq!(base.strip("/APP/Ping").as_deref(), Some("/Ping"));
        assert_eq!(base.strip("/App").as_deref(), Some("/"));
        assert_eq!(base.strip("/a"), None);

        let root = BasePath::default();
        assert_eq!(root.strip("/ping").as_deref(), Some("/ping"));
    }

    #[test]
    fn test_base_join() {
        let base = BasePath::new("/app");
        assert_eq!(base.join("/ping"), "/app/ping");
        assert_eq!(base.join("/"), "/app/");
        assert_eq!(BasePath::default().join("/plot"), "/plot");
    }
}
