//! Best-effort session facade.

use serde::Serialize;
use tracing::warn;

use crate::{SessionKey, SessionStore};

/// The five raw session fields as currently stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub token: Option<String>,
    pub username: Option<String>,
    pub roles: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_at: Option<String>,
}

/// Session storage that never fails.
///
/// A broken backend must not break page rendering, so every backend error
/// is logged and then reported as "not set" (reads) or ignored (writes).
#[derive(Debug)]
pub struct Session<S> {
    store: S,
}

impl<S: SessionStore> Session<S> {
    /// Wrap a backend.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read a raw value, `None` if absent or unreadable.
    pub fn get(&self, key: SessionKey) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key = key.as_str(), error = %err, "session read failed");
                None
            }
        }
    }

    /// Overwrite a value. Returns whether the write landed.
    pub fn set(&self, key: SessionKey, value: &str) -> bool {
        match self.store.set(key, value) {
            Ok(()) => true,
            Err(err) => {
                warn!(key = key.as_str(), error = %err, "session write failed");
                false
            }
        }
    }

    /// Delete a value.
    pub fn remove(&self, key: SessionKey) {
        if let Err(err) = self.store.remove(key) {
            warn!(key = key.as_str(), error = %err, "session remove failed");
        }
    }

    /// Read every field at once.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            token: self.get(SessionKey::Token),
            username: self.get(SessionKey::Username),
            roles: self.get(SessionKey::Roles),
            refresh_token: self.get(SessionKey::RefreshToken),
            expires_at: self.get(SessionKey::ExpiresAt),
        }
    }

    /// Access the wrapped backend.
    pub fn store(&self) -> &S {
        &self.store
    }
}
