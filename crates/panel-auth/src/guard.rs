//! Enforcement on page lifecycle events.

use std::cell::Cell;
use std::time::Duration;

use chrono::{DateTime, Utc};
use panel_session::SessionStore;
use tracing::debug;

use crate::{AuthState, Clock, EnforceOutcome, Navigator, TopRowView};

/// Lifecycle events raised by the hosting page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// Initial page load finished.
    Ready,
    /// Client-side navigation or re-render.
    Navigated,
    /// Periodic timer, fired every `SessionGuard::interval`.
    Tick,
}

/// Runs enforcement and header sync whenever the page reports an event.
///
/// The host fires `Ready` once, `Navigated` after every route change and
/// `Tick` on a timer, so enforcement happens at least once per navigation
/// and at a bounded interval otherwise.
#[derive(Debug)]
pub struct SessionGuard<S, N, C, V> {
    auth: AuthState<S, N, C>,
    view: V,
    interval: Duration,
    last_enforced: Cell<Option<DateTime<Utc>>>,
}

impl<S, N, C, V> SessionGuard<S, N, C, V>
where
    S: SessionStore,
    N: Navigator,
    C: Clock,
    V: TopRowView,
{
    /// Create a guard over auth state and a header view.
    pub fn new(auth: AuthState<S, N, C>, view: V, interval: Duration) -> Self {
        Self {
            auth,
            view,
            interval,
            last_enforced: Cell::new(None),
        }
    }

    /// Enforce, then redraw the header from whatever session is left.
    pub fn handle(&self, event: PageEvent) -> EnforceOutcome {
        let outcome = self.auth.enforce();
        self.auth.update_top_row(&self.view);
        self.last_enforced.set(Some(self.auth.now()));
        debug!(?event, ?outcome, "session enforced");
        outcome
    }

    /// Sign out from the header's logout control.
    pub fn logout(&self) {
        self.auth.logout();
        self.auth.update_top_row(&self.view);
    }

    /// The guarded auth state.
    pub fn auth(&self) -> &AuthState<S, N, C> {
        &self.auth
    }

    /// The header view redrawn after each run.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Period the host should fire `PageEvent::Tick` at.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When enforcement last ran.
    pub fn last_enforced(&self) -> Option<DateTime<Utc>> {
        self.last_enforced.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AuthConfig, FixedClock, MemoryNavigator, MemoryTopRow, TopRowElement};
    use panel_session::MemoryStore;
    use std::rc::Rc;

    fn guard(
        path: &str,
        clock: Rc<FixedClock>,
    ) -> SessionGuard<MemoryStore, MemoryNavigator, Rc<FixedClock>, MemoryTopRow> {
        let config = AuthConfig::default();
        let auth = AuthState::with_clock(MemoryStore::new(), MemoryNavigator::new(path), clock, &config);
        SessionGuard::new(auth, MemoryTopRow::new(), config.enforce_interval())
    }

    #[test]
    fn test_tick_expires_session() {
        let clock = Rc::new(FixedClock::from_rfc3339("2030-01-01T00:00:00Z").unwrap());
        let guard = guard("/servers", Rc::clone(&clock));
        guard.auth().set_data(
            "alice",
            "tok",
            None,
            &["admin"],
            Some("2030-01-01T00:01:30Z"),
        );

        assert_eq!(guard.handle(PageEvent::Ready), EnforceOutcome::Valid);
        assert_eq!(guard.view().username().as_deref(), Some("alice"));

        clock.advance(chrono::Duration::seconds(60));
        assert_eq!(guard.handle(PageEvent::Tick), EnforceOutcome::Valid);

        clock.advance(chrono::Duration::seconds(60));
        assert_eq!(
            guard.handle(PageEvent::Tick),
            EnforceOutcome::ClearedAndRedirected
        );
        assert_eq!(guard.view().is_visible(TopRowElement::LoginLink), Some(true));
        assert_eq!(guard.last_enforced(), Some(clock.now()));

        // Now on the login page: no redirect loop.
        assert_eq!(guard.handle(PageEvent::Tick), EnforceOutcome::Cleared);
        assert_eq!(guard.auth().navigator().redirects().len(), 1);
    }

    #[test]
    fn test_logout_updates_header() {
        let clock = Rc::new(FixedClock::from_rfc3339("2030-01-01T00:00:00Z").unwrap());
        let guard = guard("/roles", clock);
        guard
            .auth()
            .set_data("alice", "tok", None, &["admin"], Some("2099-01-01T00:00:00Z"));
        guard.handle(PageEvent::Navigated);
        assert_eq!(guard.view().is_visible(TopRowElement::LogoutButton), Some(true));

        guard.logout();
        assert_eq!(guard.view().is_visible(TopRowElement::LogoutButton), Some(false));
        assert_eq!(guard.auth().navigator().last_redirect().as_deref(), Some("/login"));
    }
}
