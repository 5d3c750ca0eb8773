//! Browser bindings for the admin panel session layer.
//!
//! Page scripts call `install` once per page. After that:
//! - enforcement runs on load, on `popstate`, on the `panel:navigated`
//!   document event and every `enforce_interval_secs`
//! - the header is redrawn after each run
//! - the logout control signs out
//!
//! Page controllers read the session through the exported accessors
//! (`get_token`, `is_logged_in`, `get_roles`, ...) and never write storage
//! directly.
//!
//! Everything here targets `wasm32`; on other targets the crate is empty.

#![cfg(target_arch = "wasm32")]

mod dom;
mod navigator;

use std::cell::RefCell;
use std::rc::Rc;

use panel_auth::{AuthConfig, AuthState, LoginResponse, PageEvent, SessionGuard, SystemClock};
use panel_session::BrowserStore;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub use dom::{DomTopRow, TopRowIds};
pub use navigator::BrowserNavigator;

/// Document event page frameworks dispatch after a client-side re-render.
pub const NAVIGATED_EVENT: &str = "panel:navigated";

type BrowserGuard = SessionGuard<BrowserStore, BrowserNavigator, SystemClock, DomTopRow>;

thread_local! {
    static GUARD: RefCell<Option<Rc<BrowserGuard>>> = const { RefCell::new(None) };
}

fn guard() -> Result<Rc<BrowserGuard>, JsValue> {
    GUARD
        .with(|g| g.borrow().clone())
        .ok_or_else(|| JsValue::from_str("session guard not installed"))
}

/// Install the session guard for this page.
///
/// `config_toml` overrides the defaults (login URL, public routes,
/// interval). Listeners stay registered for the page's lifetime, so a
/// second call is ignored.
#[wasm_bindgen]
pub fn install(config_toml: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    if GUARD.with(|g| g.borrow().is_some()) {
        warn!("session guard already installed");
        return Ok(());
    }

    let config = match config_toml {
        Some(content) => AuthConfig::from_toml_str(&content)
            .map_err(|e| JsValue::from_str(&format!("{:#}", e)))?,
        None => AuthConfig::default(),
    };
    let ids = TopRowIds::default();
    let logout_id = ids.logout.clone();

    let auth = AuthState::new(BrowserStore::new(), BrowserNavigator, &config);
    let guard = Rc::new(SessionGuard::new(
        auth,
        DomTopRow::new(ids),
        config.enforce_interval(),
    ));
    GUARD.with(|g| *g.borrow_mut() = Some(Rc::clone(&guard)));

    guard.handle(PageEvent::Ready);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let tick_guard = Rc::clone(&guard);
    let on_tick = Closure::<dyn FnMut()>::new(move || {
        tick_guard.handle(PageEvent::Tick);
    });
    let millis = i32::try_from(guard.interval().as_millis()).unwrap_or(i32::MAX);
    window.set_interval_with_callback_and_timeout_and_arguments_0(
        on_tick.as_ref().unchecked_ref(),
        millis,
    )?;
    on_tick.forget();

    let nav_guard = Rc::clone(&guard);
    let on_navigated = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
        nav_guard.handle(PageEvent::Navigated);
    });
    window.add_event_listener_with_callback("popstate", on_navigated.as_ref().unchecked_ref())?;
    document.add_event_listener_with_callback(
        NAVIGATED_EVENT,
        on_navigated.as_ref().unchecked_ref(),
    )?;
    on_navigated.forget();

    if let Some(logout) = document.get_element_by_id(&logout_id) {
        let logout_guard = Rc::clone(&guard);
        let on_logout = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            event.prevent_default();
            logout_guard.logout();
        });
        logout.add_event_listener_with_callback("click", on_logout.as_ref().unchecked_ref())?;
        on_logout.forget();
    }

    info!(interval_secs = config.enforce_interval_secs, "session guard installed");
    Ok(())
}

/// Run enforcement now, for hosts that signal navigation directly.
#[wasm_bindgen]
pub fn navigated() -> Result<(), JsValue> {
    guard()?.handle(PageEvent::Navigated);
    Ok(())
}

/// Whether a non-empty token is stored.
#[wasm_bindgen]
pub fn is_logged_in() -> Result<bool, JsValue> {
    Ok(guard()?.auth().is_logged_in())
}

/// Stored username, empty if absent.
#[wasm_bindgen]
pub fn get_username() -> Result<String, JsValue> {
    Ok(guard()?.auth().username())
}

/// Stored roles, empty if absent or malformed.
#[wasm_bindgen]
pub fn get_roles() -> Result<Vec<String>, JsValue> {
    Ok(guard()?.auth().roles())
}

/// Bearer token for `Authorization` headers.
#[wasm_bindgen]
pub fn get_token() -> Result<Option<String>, JsValue> {
    Ok(guard()?.auth().token())
}

/// Whether the visitor must sign in again.
#[wasm_bindgen]
pub fn is_expired() -> Result<bool, JsValue> {
    Ok(guard()?.auth().is_expired())
}

/// Store a session issued by the login page.
#[wasm_bindgen]
pub fn set_session(
    username: &str,
    token: &str,
    refresh_token: Option<String>,
    roles: Vec<String>,
    expires_at: Option<String>,
) -> Result<(), JsValue> {
    let guard = guard()?;
    guard.auth().set_data(
        username,
        token,
        refresh_token.as_deref(),
        &roles,
        expires_at.as_deref(),
    );
    guard.auth().update_top_row(guard.view());
    Ok(())
}

/// Store a session from the raw login response body.
#[wasm_bindgen]
pub fn set_session_from_login(body: &str) -> Result<(), JsValue> {
    let login = LoginResponse::from_json(body).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let guard = guard()?;
    guard.auth().apply_login(&login);
    guard.auth().update_top_row(guard.view());
    Ok(())
}

/// Clear the session and go to the login page.
#[wasm_bindgen]
pub fn logout() -> Result<(), JsValue> {
    guard()?.logout();
    Ok(())
}
