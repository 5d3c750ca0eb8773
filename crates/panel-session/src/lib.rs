//! Tab-scoped session storage for the reseller admin panel.
//!
//! This crate provides:
//! - `SessionKey` - The stable storage names of the auth fields
//! - `SessionStore` - Backend trait over a string key-value store
//! - `MemoryStore` - In-process backend for native builds and tests
//! - `BrowserStore` - `window.sessionStorage` backend (wasm32 only)
//! - `Session` - Best-effort facade that never surfaces storage errors
//!
//! # Example
//!
//! ```rust
//! use panel_session::{MemoryStore, Session, SessionKey};
//!
//! let session = Session::new(MemoryStore::new());
//! session.set(SessionKey::Username, "alice");
//! assert_eq!(session.get(SessionKey::Username).as_deref(), Some("alice"));
//!
//! session.remove(SessionKey::Username);
//! assert_eq!(session.get(SessionKey::Username), None);
//! ```

mod error;
mod key;
mod session;
mod store;

#[cfg(target_arch = "wasm32")]
mod browser;

pub use error::StoreError;
pub use key::SessionKey;
pub use session::{Session, SessionSnapshot};
pub use store::{MemoryStore, SessionStore};

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStore;
