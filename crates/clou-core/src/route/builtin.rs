//! Builtin application routes and their guard metadata.
//!
//! The table is loaded once at startup and cached for the lifetime of the
//! application; only the guard metadata lives here, view wiring does not.

use serde::Serialize;
use std::sync::OnceLock;

/// Guard metadata for one application route.
#[derive(Debug, Clone, Serialize)]
pub struct RouteMeta {
    /// Path pattern; `:name` segments match any single segment.
    pub path: &'static str,
    /// Route name.
    pub name: &'static str,
    /// Whether the route requires an authenticated session.
    pub requires_auth: bool,
    /// Whether the route is only for anonymous users (login/signup).
    pub guest_only: bool,
}

impl RouteMeta {
    const fn public(path: &'static str, name: &'static str) -> Self {
        Self {
            path,
            name,
            requires_auth: false,
            guest_only: false,
        }
    }

    const fn protected(path: &'static str, name: &'static str) -> Self {
        Self {
            path,
            name,
            requires_auth: true,
            guest_only: false,
        }
    }

    const fn guest(path: &'static str, name: &'static str) -> Self {
        Self {
            path,
            name,
            requires_auth: false,
            guest_only: true,
        }
    }

    /// Whether `target_path` matches this route's pattern.
    ///
    /// Matching is segment-wise; a `:name` segment matches any non-empty
    /// concrete segment.
    pub fn matches(&self, target_path: &str) -> bool {
        let pattern: Vec<&str> = self.path.split('/').filter(|s| !s.is_empty()).collect();
        let target: Vec<&str> = target_path
            .split('?')
            .next()
            .unwrap_or(target_path)
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        if pattern.len() != target.len() {
            return false;
        }
        pattern
            .iter()
            .zip(&target)
            .all(|(p, t)| p.starts_with(':') || p == t)
    }
}

/// Static storage for builtin routes (initialized once).
static BUILTIN_ROUTES: OnceLock<Vec<RouteMeta>> = OnceLock::new();

/// Returns a reference to all builtin routes.
pub fn builtin_routes() -> &'static [RouteMeta] {
    BUILTIN_ROUTES.get_or_init(|| {
        vec![
            RouteMeta::public("/", "home"),
            RouteMeta::public("/movies", "movies"),
            RouteMeta::public("/movies/:id", "movie-detail"),
            RouteMeta::public("/emotions", "emotions"),
            RouteMeta::public("/emotions/:name", "emotion-movies"),
            RouteMeta::protected("/diary", "diary"),
            RouteMeta::protected("/diary/:id", "diary-detail"),
            RouteMeta::protected("/mypage", "mypage"),
            RouteMeta::guest("/login", "login"),
            RouteMeta::guest("/signup", "signup"),
        ]
    })
}

/// Finds the first builtin route matching `target_path`.
pub fn find_route(target_path: &str) -> Option<&'static RouteMeta> {
    builtin_routes().iter().find(|r| r.matches(target_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_matches_only_root() {
        assert_eq!(find_route("/").map(|r| r.name), Some("home"));
        assert_eq!(find_route("/movies").map(|r| r.name), Some("movies"));
    }

    #[test]
    fn test_parameterized_match() {
        assert_eq!(find_route("/movies/496243").map(|r| r.name), Some("movie-detail"));
        assert_eq!(find_route("/diary/7").map(|r| r.name), Some("diary-detail"));
    }

    #[test]
    fn test_query_string_is_ignored_for_matching() {
        assert_eq!(
            find_route("/login?redirect=/diary").map(|r| r.name),
            Some("login")
        );
    }

    #[test]
    fn test_unknown_path_has_no_route() {
        assert!(find_route("/movies/1/extra").is_none());
    }

    #[test]
    fn test_guard_flags() {
        assert!(find_route("/diary").unwrap().requires_auth);
        assert!(find_route("/login").unwrap().guest_only);
        assert!(!find_route("/movies").unwrap().requires_auth);
    }
}
