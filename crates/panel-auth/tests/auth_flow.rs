//! End-to-end session behaviour over in-memory storage.

use std::rc::Rc;

use chrono::Duration;
use panel_auth::{
    AuthConfig, AuthState, EnforceOutcome, FixedClock, LoginResponse, MemoryNavigator,
};
use panel_session::{MemoryStore, SessionKey, SessionStore};

const NOW: &str = "2030-01-01T00:00:00Z";

type TestAuth = AuthState<Rc<MemoryStore>, MemoryNavigator, Rc<FixedClock>>;

fn setup(path: &str) -> (TestAuth, Rc<MemoryStore>, Rc<FixedClock>) {
    let store = Rc::new(MemoryStore::new());
    let clock = Rc::new(FixedClock::from_rfc3339(NOW).unwrap());
    let auth = AuthState::with_clock(
        Rc::clone(&store),
        MemoryNavigator::new(path),
        Rc::clone(&clock),
        &AuthConfig::default(),
    );
    (auth, store, clock)
}

#[test]
fn absent_or_empty_token_is_logged_out_and_expired() {
    for token in [None, Some("")] {
        for expiry in [None, Some("2099-01-01T00:00:00Z"), Some("garbage")] {
            let (auth, store, _) = setup("/");
            if let Some(token) = token {
                store.set(SessionKey::Token, token).unwrap();
            }
            if let Some(expiry) = expiry {
                store.set(SessionKey::ExpiresAt, expiry).unwrap();
            }
            assert!(!auth.is_logged_in(), "token={:?} expiry={:?}", token, expiry);
            assert!(auth.is_expired(), "token={:?} expiry={:?}", token, expiry);
        }
    }
}

#[test]
fn past_expiry_is_expired() {
    for expiry in [
        "2029-12-31T23:59:59Z",
        "2000-01-01T00:00:00.000Z",
        "2029-12-31",
        NOW,
    ] {
        let (auth, _, _) = setup("/");
        auth.set_data("alice", "tok", None, &["admin"], Some(expiry));
        assert!(auth.is_logged_in());
        assert!(auth.is_expired(), "expiry={}", expiry);
    }
}

#[test]
fn future_expiry_is_valid() {
    for expiry in [
        "2030-01-01T00:00:01Z",
        "2030-01-01T01:00:00+00:30",
        "2099-01-01",
    ] {
        let (auth, _, _) = setup("/");
        auth.set_data("alice", "tok", None, &["admin"], Some(expiry));
        assert!(!auth.is_expired(), "expiry={}", expiry);
    }
}

#[test]
fn set_data_round_trips() {
    let (auth, store, _) = setup("/");
    auth.set_data(
        "alice",
        "tok123",
        Some("ref456"),
        &["billing", "admin", "support"],
        Some("2099-01-01T00:00:00Z"),
    );

    assert_eq!(auth.username(), "alice");
    assert_eq!(auth.token().as_deref(), Some("tok123"));
    assert_eq!(auth.roles(), vec!["billing", "admin", "support"]);
    assert_eq!(
        store.get(SessionKey::Roles).unwrap().as_deref(),
        Some(r#"["billing","admin","support"]"#)
    );
}

#[test]
fn set_data_without_refresh_token_keeps_existing() {
    let (auth, _, _) = setup("/");
    auth.set_data("alice", "tok1", Some("ref456"), &["admin"], Some("2099-01-01T00:00:00Z"));
    auth.set_data("alice", "tok2", None, &["admin"], None);

    assert_eq!(auth.token().as_deref(), Some("tok2"));
    assert_eq!(auth.refresh_token().as_deref(), Some("ref456"));
    assert!(auth.expires_at().is_some());
}

#[test]
fn clear_is_idempotent() {
    let (auth, store, _) = setup("/");
    auth.set_data("alice", "tok", Some("ref"), &["admin"], Some("2099-01-01T00:00:00Z"));

    auth.clear();
    assert!(store.is_empty());
    assert_eq!(auth.username(), "");
    assert_eq!(auth.token(), None);
    assert_eq!(auth.refresh_token(), None);
    assert_eq!(auth.expires_at(), None);
    assert!(auth.roles().is_empty());

    auth.clear();
    assert!(store.is_empty());
}

#[test]
fn enforce_expired_on_protected_route_clears_and_redirects() {
    let (auth, store, clock) = setup("/domains/expiring");
    auth.set_data("alice", "tok", Some("ref"), &["admin"], Some("2030-01-01T00:05:00Z"));

    clock.advance(Duration::minutes(5));
    assert_eq!(auth.enforce(), EnforceOutcome::ClearedAndRedirected);
    assert!(store.is_empty());
    assert_eq!(auth.navigator().redirects(), vec!["/login".to_string()]);
}

#[test]
fn enforce_expired_on_public_route_clears_without_redirect() {
    for path in ["/login", "/Forgot-Password", "/my-account/confirm-email/abc"] {
        let (auth, store, _) = setup(path);
        auth.set_data("alice", "tok", None, &["admin"], Some("2020-01-01T00:00:00Z"));

        assert_eq!(auth.enforce(), EnforceOutcome::Cleared, "path={}", path);
        assert!(store.is_empty());
        assert!(auth.navigator().redirects().is_empty());
    }
}

#[test]
fn enforce_valid_session_changes_nothing() {
    let (auth, store, _) = setup("/hosting-panels");
    auth.set_data("alice", "tok", Some("ref"), &["admin"], Some("2099-01-01T00:00:00Z"));
    let before = auth.snapshot();

    for _ in 0..3 {
        assert_eq!(auth.enforce(), EnforceOutcome::Valid);
    }
    assert_eq!(auth.snapshot(), before);
    assert_eq!(store.len(), 5);
    assert!(auth.navigator().redirects().is_empty());
}

#[test]
fn enforce_anonymous_on_protected_route_redirects() {
    let (auth, _, _) = setup("/dashboard");
    assert_eq!(auth.enforce(), EnforceOutcome::ClearedAndRedirected);
}

#[test]
fn alice_scenario() {
    let (auth, _, _) = setup("/");
    auth.set_data(
        "alice",
        "tok123",
        Some("ref456"),
        &["admin", "billing"],
        Some("2099-01-01T00:00:00Z"),
    );

    assert!(auth.is_logged_in());
    assert_eq!(auth.username(), "alice");
    assert_eq!(auth.roles(), vec!["admin", "billing"]);
    assert!(!auth.is_expired());
}

#[test]
fn malformed_roles_read_as_empty() {
    let (auth, store, _) = setup("/");
    store.set(SessionKey::Roles, "{not valid json}").unwrap();
    assert!(auth.roles().is_empty());
}

#[test]
fn login_exchange_establishes_session() {
    let (auth, _, _) = setup("/login");
    let login = LoginResponse::from_json(
        r#"{"username":"bob","accessToken":"abc","roles":["support"],"expiresAt":"2030-01-01T08:00:00Z"}"#,
    )
    .unwrap();

    auth.apply_login(&login);
    assert!(auth.is_logged_in());
    assert!(auth.has_role("support"));
    assert_eq!(auth.refresh_token(), None);
    assert_eq!(auth.enforce(), EnforceOutcome::Valid);
}
