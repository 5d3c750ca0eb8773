//! Public route allow-list.

use serde::{Deserialize, Serialize};

/// Routes reachable without a valid session.
pub const DEFAULT_PUBLIC_ROUTES: [&str; 4] = [
    "login",
    "forgot-password",
    "my-account/change-password",
    "my-account/confirm-email",
];

/// Case-insensitive allow-list of public route prefixes.
///
/// A path matches a route when it equals the route or continues it with a
/// `/subpath`; `/login` and `/Login/reset` match `login`, `/login-help`
/// does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct PublicRoutes {
    routes: Vec<String>,
}

impl PublicRoutes {
    /// An empty allow-list: every route is protected.
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// The narrower list some panel pages were built against.
    pub fn minimal() -> Self {
        Self::new()
            .allow("login")
            .allow("my-account/change-password")
    }

    /// Add a route.
    pub fn allow(mut self, route: impl AsRef<str>) -> Self {
        let route = normalize(route.as_ref());
        if !route.is_empty() && !self.routes.contains(&route) {
            self.routes.push(route);
        }
        self
    }

    /// Check whether a location path is public.
    pub fn matches(&self, path: &str) -> bool {
        let path = normalize(path);
        self.routes.iter().any(|route| {
            path == *route
                || path
                    .strip_prefix(route.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// Iterate over the normalized routes.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(String::as_str)
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether every route is protected.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for PublicRoutes {
    fn default() -> Self {
        DEFAULT_PUBLIC_ROUTES
            .iter()
            .fold(Self::new(), |routes, route| routes.allow(route))
    }
}

impl From<Vec<String>> for PublicRoutes {
    fn from(routes: Vec<String>) -> Self {
        routes
            .into_iter()
            .fold(Self::new(), |routes, route| routes.allow(route))
    }
}

impl From<PublicRoutes> for Vec<String> {
    fn from(routes: PublicRoutes) -> Self {
        routes.routes
    }
}

fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.trim_matches('/').to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_routes() {
        let routes = PublicRoutes::default();
        assert!(routes.matches("/login"));
        assert!(routes.matches("/forgot-password"));
        assert!(routes.matches("/my-account/change-password"));
        assert!(routes.matches("/my-account/confirm-email"));
        assert!(!routes.matches("/"));
        assert!(!routes.matches("/customers"));
        assert!(!routes.matches("/my-account"));
        assert!(!routes.matches("/my-account/profile"));
    }

    #[test]
    fn test_case_insensitive() {
        let routes = PublicRoutes::default();
        assert!(routes.matches("/LOGIN"));
        assert!(routes.matches("/My-Account/Change-Password"));
    }

    #[test]
    fn test_subpath_and_boundaries() {
        let routes = PublicRoutes::default();
        assert!(routes.matches("/login/"));
        assert!(routes.matches("/login/callback"));
        assert!(routes.matches("/login?returnUrl=%2Fdomains"));
        assert!(routes.matches("/forgot-password#sent"));
        assert!(!routes.matches("/login-help"));
        assert!(!routes.matches("/admin/login"));
    }

    #[test]
    fn test_minimal_omits_recovery_routes() {
        let routes = PublicRoutes::minimal();
        assert!(routes.matches("/login"));
        assert!(routes.matches("/my-account/change-password"));
        assert!(!routes.matches("/forgot-password"));
        assert!(!routes.matches("/my-account/confirm-email"));
    }

    #[test]
    fn test_allow_normalizes_and_dedups() {
        let routes = PublicRoutes::new()
            .allow("/Status/")
            .allow("status")
            .allow("/");
        assert_eq!(routes.iter().collect::<Vec<_>>(), vec!["status"]);
        assert!(routes.matches("/status/health"));
    }

    #[test]
    fn test_deserialize_from_list() {
        let routes: PublicRoutes = serde_json::from_str(r#"["/Login", "signup"]"#).unwrap();
        assert_eq!(routes.len(), 2);
        assert!(routes.matches("/signup"));
        assert_eq!(
            serde_json::to_string(&routes).unwrap(),
            r#"["login","signup"]"#
        );
    }
}
