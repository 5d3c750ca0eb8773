//! Session auth state for the reseller admin panel.
//!
//! Every page of the panel shares one tab-scoped session. This crate owns it:
//! - `AuthState` - Accessors, `set_data` / `clear` / `logout`, expiry, enforcement
//! - `PublicRoutes` - Pages reachable without a valid session
//! - `SessionGuard` - Runs enforcement on page lifecycle events
//! - `AuthConfig` - Login URL, public routes, enforcement interval
//!
//! # Example
//!
//! ```rust
//! use panel_auth::{AuthConfig, AuthState, EnforceOutcome, FixedClock, MemoryNavigator};
//! use panel_session::MemoryStore;
//!
//! let clock = FixedClock::from_rfc3339("2030-01-01T00:00:00Z").unwrap();
//! let auth = AuthState::with_clock(
//!     MemoryStore::new(),
//!     MemoryNavigator::new("/customers"),
//!     clock,
//!     &AuthConfig::default(),
//! );
//!
//! auth.set_data("alice", "tok123", Some("ref456"), &["admin"], Some("2099-01-01T00:00:00Z"));
//! assert!(!auth.is_expired());
//! assert_eq!(auth.enforce(), EnforceOutcome::Valid);
//! ```

mod clock;
mod config;
mod expiry;
mod guard;
mod login;
mod navigator;
mod routes;
mod state;
mod top_row;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AuthConfig;
pub use expiry::parse_expiry;
pub use guard::{PageEvent, SessionGuard};
pub use login::LoginResponse;
pub use navigator::{MemoryNavigator, Navigator};
pub use routes::{PublicRoutes, DEFAULT_PUBLIC_ROUTES};
pub use state::{AuthState, EnforceOutcome};
pub use top_row::{MemoryTopRow, TopRowElement, TopRowView};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        AuthConfig, AuthState, EnforceOutcome, Navigator, PageEvent, SessionGuard, TopRowView,
    };
    pub use panel_session::{SessionKey, SessionStore};
}
