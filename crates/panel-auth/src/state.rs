//! Session auth state.

use chrono::{DateTime, Utc};
use http::HeaderValue;
use panel_session::{Session, SessionKey, SessionSnapshot, SessionStore};
use tracing::{debug, info, warn};

use crate::{
    parse_expiry, AuthConfig, Clock, LoginResponse, Navigator, PublicRoutes, SystemClock,
    TopRowElement, TopRowView,
};

/// What `enforce` decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnforceOutcome {
    /// Session is valid; nothing touched.
    Valid,
    /// Session was expired or missing and has been cleared. The page is
    /// public so no redirect happened.
    Cleared,
    /// Session was cleared and the visitor sent to the login page.
    ClearedAndRedirected,
}

/// The tab's auth state.
///
/// Owns the session fields; other page code only reads them through the
/// accessors. No operation returns an error: unreadable or malformed data
/// counts as absent, which leaves the visitor logged out.
#[derive(Debug)]
pub struct AuthState<S, N, C = SystemClock> {
    session: Session<S>,
    navigator: N,
    clock: C,
    login_url: String,
    public_routes: PublicRoutes,
}

impl<S: SessionStore, N: Navigator> AuthState<S, N, SystemClock> {
    /// Create auth state over a backend, using wall-clock time.
    pub fn new(store: S, navigator: N, config: &AuthConfig) -> Self {
        Self::with_clock(store, navigator, SystemClock, config)
    }
}

impl<S: SessionStore, N: Navigator, C: Clock> AuthState<S, N, C> {
    /// Create auth state with an explicit time source.
    pub fn with_clock(store: S, navigator: N, clock: C, config: &AuthConfig) -> Self {
        Self {
            session: Session::new(store),
            navigator,
            clock,
            login_url: config.login_url.clone(),
            public_routes: config.public_routes.clone(),
        }
    }

    /// Whether a non-empty token is stored.
    pub fn is_logged_in(&self) -> bool {
        self.token().is_some_and(|t| !t.is_empty())
    }

    /// Stored username, empty if absent.
    pub fn username(&self) -> String {
        self.session.get(SessionKey::Username).unwrap_or_default()
    }

    /// Stored roles in their original order, empty if absent or malformed.
    pub fn roles(&self) -> Vec<String> {
        let Some(raw) = self.session.get(SessionKey::Roles) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(roles) => roles,
            Err(err) => {
                warn!(error = %err, "stored roles are not a JSON string array");
                Vec::new()
            }
        }
    }

    /// Whether the session carries `role` (ASCII case-insensitive).
    pub fn has_role(&self, role: &str) -> bool {
        self.roles().iter().any(|r| r.eq_ignore_ascii_case(role))
    }

    /// Raw bearer token.
    pub fn token(&self) -> Option<String> {
        self.session.get(SessionKey::Token)
    }

    /// Stored refresh token.
    pub fn refresh_token(&self) -> Option<String> {
        self.session.get(SessionKey::RefreshToken)
    }

    /// Parsed expiry, `None` if absent or unparseable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.session
            .get(SessionKey::ExpiresAt)
            .and_then(|raw| parse_expiry(&raw))
    }

    /// Whether the visitor must sign in again.
    ///
    /// True unless there is a token and a parseable expiry still in the
    /// future.
    pub fn is_expired(&self) -> bool {
        if !self.is_logged_in() {
            return true;
        }
        match self.expires_at() {
            Some(expires_at) => self.clock.now() >= expires_at,
            None => true,
        }
    }

    /// `Authorization` header value for API calls, `None` when logged out.
    pub fn bearer_header(&self) -> Option<HeaderValue> {
        let token = self.token().filter(|t| !t.is_empty())?;
        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("stored token is not a valid header value");
                None
            }
        }
    }

    /// Store a freshly issued session.
    ///
    /// Username, token and roles are always written. The refresh token and
    /// expiry are only written when given and non-empty; otherwise any
    /// previous value is kept so an access-token update does not drop the
    /// refresh token. If any of those writes fails the token is not
    /// stored and the tab reads as signed out.
    pub fn set_data<R: AsRef<str>>(
        &self,
        username: &str,
        token: &str,
        refresh_token: Option<&str>,
        roles: &[R],
        expires_at: Option<&str>,
    ) {
        let roles: Vec<&str> = roles.iter().map(AsRef::as_ref).collect();
        let roles = serde_json::to_string(&roles).unwrap_or_else(|_| "[]".to_string());

        // Token last, and only once every other field is stored.
        self.session.remove(SessionKey::Token);

        let mut stored = self.session.set(SessionKey::Username, username);
        stored &= self.session.set(SessionKey::Roles, &roles);
        if let Some(refresh_token) = refresh_token.filter(|t| !t.is_empty()) {
            stored &= self.session.set(SessionKey::RefreshToken, refresh_token);
        }
        if let Some(expires_at) = expires_at.filter(|t| !t.is_empty()) {
            stored &= self.session.set(SessionKey::ExpiresAt, expires_at);
        }

        if !stored {
            warn!(username, "session update incomplete, staying signed out");
            return;
        }
        self.session.set(SessionKey::Token, token);
        debug!(username, "session data stored");
    }

    /// Store the result of a login exchange.
    pub fn apply_login(&self, login: &LoginResponse) {
        self.set_data(
            &login.username,
            &login.access_token,
            login.refresh_token.as_deref(),
            &login.roles,
            login.expires_at.as_deref(),
        );
        info!(username = %login.username, roles = login.roles.len(), "signed in");
    }

    /// Remove every session field.
    pub fn clear(&self) {
        for key in SessionKey::ALL {
            self.session.remove(key);
        }
    }

    /// Clear the session and go to the login page.
    pub fn logout(&self) {
        info!(username = %self.username(), "signing out");
        self.clear();
        self.navigator.redirect(&self.login_url);
    }

    /// Sync the header with the session.
    pub fn update_top_row<V: TopRowView + ?Sized>(&self, view: &V) {
        let logged_in = self.is_logged_in();
        let username = if logged_in {
            self.username()
        } else {
            String::new()
        };

        view.set_username(&username);
        view.set_visible(TopRowElement::LoginLink, !logged_in);
        view.set_visible(TopRowElement::UserInfo, logged_in);
        view.set_visible(TopRowElement::LogoutButton, logged_in);
    }

    /// Clear an expired session and send the visitor to the login page
    /// unless the current page is public.
    pub fn enforce(&self) -> EnforceOutcome {
        if !self.is_expired() {
            return EnforceOutcome::Valid;
        }

        let path = self.navigator.current_path();
        let public = self.public_routes.matches(&path);
        self.clear();

        if public {
            debug!(%path, "no valid session on public route");
            EnforceOutcome::Cleared
        } else {
            info!(%path, login_url = %self.login_url, "session expired, redirecting");
            self.navigator.redirect(&self.login_url);
            EnforceOutcome::ClearedAndRedirected
        }
    }

    /// Raw stored fields, for diagnostics.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// The navigator used for redirects.
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}
