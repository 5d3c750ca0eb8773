//! `window.sessionStorage` backend.

use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::{SessionKey, SessionStore, StoreError};

/// Backend over the browser's per-tab `sessionStorage`.
///
/// The storage handle is looked up on every call so a tab that blocks
/// storage still loads; the failure surfaces as `StoreError::Unavailable`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStore;

impl BrowserStore {
    /// Create a handle to the tab's `sessionStorage`.
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Result<Storage, StoreError> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".to_string()))?;
        window
            .session_storage()
            .map_err(|e| StoreError::Unavailable(describe(&e)))?
            .ok_or_else(|| StoreError::Unavailable("sessionStorage missing".to_string()))
    }
}

impl SessionStore for BrowserStore {
    fn get(&self, key: SessionKey) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(key.as_str())
            .map_err(|e| StoreError::operation(key.as_str(), describe(&e)))
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(key.as_str(), value)
            .map_err(|e| StoreError::operation(key.as_str(), describe(&e)))
    }

    fn remove(&self, key: SessionKey) -> Result<(), StoreError> {
        self.storage()?
            .remove_item(key.as_str())
            .map_err(|e| StoreError::operation(key.as_str(), describe(&e)))
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
