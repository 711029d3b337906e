//! Route guard: decides, per navigation, whether a target route may be
//! entered given the current authentication state.
//!
//! The guard is a pure function and is re-evaluated on every navigation;
//! nothing here is cached between calls.

pub mod builtin;

use serde::{Deserialize, Serialize};

pub use builtin::{RouteMeta, find_route};

/// Query key carrying the originally requested path through a login redirect.
pub const REDIRECT_QUERY_KEY: &str = "redirect";

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Navigation may proceed.
    Proceed,
    /// Navigation must be redirected.
    RedirectTo {
        path: String,
        /// Original target path, carried as the `redirect` query parameter
        /// so the login flow can resume where the user was headed.
        redirect: Option<String>,
    },
}

impl GuardDecision {
    fn redirect_to_login(target_path: &str) -> Self {
        Self::RedirectTo {
            path: "/login".to_string(),
            redirect: Some(target_path.to_string()),
        }
    }

    fn redirect_home() -> Self {
        Self::RedirectTo {
            path: "/".to_string(),
            redirect: None,
        }
    }
}

/// Evaluates the guard for a navigation to `target_path` matching `route`.
///
/// - Protected route while unauthenticated: redirect to `/login`, carrying
///   the original path.
/// - Guest-only route (login/signup) while authenticated: redirect to `/`.
/// - Otherwise: proceed.
pub fn evaluate(target_path: &str, route: &RouteMeta, is_authenticated: bool) -> GuardDecision {
    if route.requires_auth && !is_authenticated {
        return GuardDecision::redirect_to_login(target_path);
    }
    if route.guest_only && is_authenticated {
        return GuardDecision::redirect_home();
    }
    GuardDecision::Proceed
}

/// Convenience wrapper: resolves `target_path` against the built-in route
/// table and evaluates the guard. Unknown paths proceed (there is nothing to
/// protect).
pub fn evaluate_path(target_path: &str, is_authenticated: bool) -> GuardDecision {
    match find_route(target_path) {
        Some(route) => evaluate(target_path, route, is_authenticated),
        None => GuardDecision::Proceed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_route_redirects_anonymous_to_login() {
        let decision = evaluate_path("/diary", false);
        assert_eq!(
            decision,
            GuardDecision::RedirectTo {
                path: "/login".to_string(),
                redirect: Some("/diary".to_string()),
            }
        );
    }

    #[test]
    fn test_protected_route_proceeds_when_authenticated() {
        assert_eq!(evaluate_path("/diary", true), GuardDecision::Proceed);
    }

    #[test]
    fn test_guest_route_redirects_authenticated_home() {
        let decision = evaluate_path("/login", true);
        assert_eq!(
            decision,
            GuardDecision::RedirectTo {
                path: "/".to_string(),
                redirect: None,
            }
        );
    }

    #[test]
    fn test_public_route_always_proceeds() {
        assert_eq!(evaluate_path("/movies", false), GuardDecision::Proceed);
        assert_eq!(evaluate_path("/movies", true), GuardDecision::Proceed);
    }

    #[test]
    fn test_parameterized_route_redirect_keeps_concrete_path() {
        let decision = evaluate_path("/diary/42", false);
        assert_eq!(
            decision,
            GuardDecision::RedirectTo {
                path: "/login".to_string(),
                redirect: Some("/diary/42".to_string()),
            }
        );
    }

    #[test]
    fn test_unknown_path_proceeds() {
        assert_eq!(evaluate_path("/nowhere", false), GuardDecision::Proceed);
    }
}
