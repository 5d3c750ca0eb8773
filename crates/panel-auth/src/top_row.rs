//! Top row (header) synchronization.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// Header controls whose visibility follows the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopRowElement {
    LoginLink,
    UserInfo,
    LogoutButton,
}

/// The page header showing who is signed in.
///
/// Implementations skip elements the current page does not render.
pub trait TopRowView {
    /// Write the signed-in username, empty when signed out.
    fn set_username(&self, username: &str);
    /// Show or hide a header control.
    fn set_visible(&self, element: TopRowElement, visible: bool);
}

impl<V: TopRowView + ?Sized> TopRowView for &V {
    fn set_username(&self, username: &str) {
        (**self).set_username(username)
    }

    fn set_visible(&self, element: TopRowElement, visible: bool) {
        (**self).set_visible(element, visible)
    }
}

/// In-memory header, for native hosts and tests.
///
/// Elements can be left out to model pages that render only part of the
/// header; writes to them are dropped.
#[derive(Debug, Default)]
pub struct MemoryTopRow {
    username: RefCell<Option<String>>,
    visible: RefCell<HashMap<TopRowElement, bool>>,
    missing: HashSet<TopRowElement>,
    missing_username: bool,
}

impl MemoryTopRow {
    /// Create a header with every element present.
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave `element` off the page.
    pub fn without(mut self, element: TopRowElement) -> Self {
        self.missing.insert(element);
        self
    }

    /// Leave the username slot off the page.
    pub fn without_username(mut self) -> Self {
        self.missing_username = true;
        self
    }

    /// Text last written to the username slot, `None` if never written.
    pub fn username(&self) -> Option<String> {
        self.username.borrow().clone()
    }

    /// Visibility last applied to an element, `None` if never touched.
    pub fn is_visible(&self, element: TopRowElement) -> Option<bool> {
        self.visible.borrow().get(&element).copied()
    }
}

impl TopRowView for MemoryTopRow {
    fn set_username(&self, username: &str) {
        if self.missing_username {
            return;
        }
        *self.username.borrow_mut() = Some(username.to_string());
    }

    fn set_visible(&self, element: TopRowElement, visible: bool) {
        if self.missing.contains(&element) {
            return;
        }
        self.visible.borrow_mut().insert(element, visible);
    }
}
