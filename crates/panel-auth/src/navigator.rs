//! Page navigation.

use std::cell::RefCell;
use std::rc::Rc;

/// The hosting page's location.
pub trait Navigator {
    /// Path of the current page, e.g. `/domains/expiring`.
    fn current_path(&self) -> String;

    /// Full navigation to `url`, discarding in-memory page state.
    fn redirect(&self, url: &str);
}

impl<N: Navigator + ?Sized> Navigator for &N {
    fn current_path(&self) -> String {
        (**self).current_path()
    }

    fn redirect(&self, url: &str) {
        (**self).redirect(url)
    }
}

impl<N: Navigator + ?Sized> Navigator for Rc<N> {
    fn current_path(&self) -> String {
        (**self).current_path()
    }

    fn redirect(&self, url: &str) {
        (**self).redirect(url)
    }
}

/// Navigator that records redirects instead of leaving the page.
///
/// A redirect also moves the current path, as a real navigation would.
#[derive(Debug, Default)]
pub struct MemoryNavigator {
    path: RefCell<String>,
    redirects: RefCell<Vec<String>>,
}

impl MemoryNavigator {
    /// Create a navigator sitting on `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: RefCell::new(path.into()),
            redirects: RefCell::default(),
        }
    }

    /// Simulate client-side navigation.
    pub fn set_path(&self, path: impl Into<String>) {
        *self.path.borrow_mut() = path.into();
    }

    /// Every redirect so far, oldest first.
    pub fn redirects(&self) -> Vec<String> {
        self.redirects.borrow().clone()
    }

    /// Most recent redirect target.
    pub fn last_redirect(&self) -> Option<String> {
        self.redirects.borrow().last().cloned()
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }

    fn redirect(&self, url: &str) {
        self.redirects.borrow_mut().push(url.to_string());
        self.set_path(url);
    }
}
