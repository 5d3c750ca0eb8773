//! `window.location` navigator.

use panel_auth::Navigator;
use tracing::warn;

/// Reads and changes the browser location.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default()
    }

    fn redirect(&self, url: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(err) = window.location().assign(url) {
            warn!(url, error = ?err, "redirect failed");
        }
    }
}
