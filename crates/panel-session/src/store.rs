//! Storage backends.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::{SessionKey, StoreError};

/// A string key-value backend scoped to one browser tab.
///
/// Implementations perform no validation of values; callers own the shape
/// of what they write.
pub trait SessionStore {
    /// Read a raw value, `None` if never set.
    fn get(&self, key: SessionKey) -> Result<Option<String>, StoreError>;

    /// Overwrite a value.
    fn set(&self, key: SessionKey, value: &str) -> Result<(), StoreError>;

    /// Delete a value. Removing an absent key succeeds.
    fn remove(&self, key: SessionKey) -> Result<(), StoreError>;
}

impl<S: SessionStore + ?Sized> SessionStore for &S {
    fn get(&self, key: SessionKey) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: SessionKey) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Rc<S> {
    fn get(&self, key: SessionKey) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: SessionKey) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// In-process backend.
///
/// Used on native targets and in tests in place of `sessionStorage`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<&'static str, String>>,
    unavailable: bool,
    failing_writes: Vec<SessionKey>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose every operation fails, as when the browser
    /// blocks storage access.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Seed a raw value, bypassing any caller.
    pub fn with_entry(self, key: SessionKey, value: impl Into<String>) -> Self {
        self.entries.borrow_mut().insert(key.as_str(), value.into());
        self
    }

    /// Make writes to `key` fail, as when the browser quota is exhausted.
    pub fn with_failing_writes(mut self, key: SessionKey) -> Self {
        self.failing_writes.push(key);
        self
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable {
            Err(StoreError::Unavailable("memory store disabled".to_string()))
        } else {
            Ok(())
        }
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: SessionKey) -> Result<Option<String>, StoreError> {
        self.check()?;
        Ok(self.entries.borrow().get(key.as_str()).cloned())
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), StoreError> {
        self.check()?;
        if self.failing_writes.contains(&key) {
            return Err(StoreError::operation(key.as_str(), "quota exceeded"));
        }
        self.entries
            .borrow_mut()
            .insert(key.as_str(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: SessionKey) -> Result<(), StoreError> {
        self.check()?;
        self.entries.borrow_mut().remove(key.as_str());
        Ok(())
    }
}
