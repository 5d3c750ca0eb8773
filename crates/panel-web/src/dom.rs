//! DOM-backed page header.

use panel_auth::{TopRowElement, TopRowView};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Element ids of the header controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopRowIds {
    pub username: String,
    pub login_link: String,
    pub user_info: String,
    pub logout: String,
}

impl Default for TopRowIds {
    fn default() -> Self {
        Self {
            username: "top-username".to_string(),
            login_link: "top-login".to_string(),
            user_info: "top-user-info".to_string(),
            logout: "top-logout".to_string(),
        }
    }
}

/// Header controls looked up by id on every update.
///
/// Pages without a header (or with only part of it) are fine; missing
/// elements are skipped.
#[derive(Debug, Clone, Default)]
pub struct DomTopRow {
    ids: TopRowIds,
}

impl DomTopRow {
    /// Create a header view over the given element ids.
    pub fn new(ids: TopRowIds) -> Self {
        Self { ids }
    }

    fn element(&self, id: &str) -> Option<HtmlElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id(id)?
            .dyn_into::<HtmlElement>()
            .ok()
    }
}

impl TopRowView for DomTopRow {
    fn set_username(&self, username: &str) {
        if let Some(el) = self.element(&self.ids.username) {
            el.set_text_content(Some(username));
        }
    }

    fn set_visible(&self, element: TopRowElement, visible: bool) {
        let id = match element {
            TopRowElement::LoginLink => &self.ids.login_link,
            TopRowElement::UserInfo => &self.ids.user_info,
            TopRowElement::LogoutButton => &self.ids.logout,
        };
        if let Some(el) = self.element(id) {
            el.set_hidden(!visible);
        }
    }
}
