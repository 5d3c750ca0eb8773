//! Storage key catalogue.

use std::fmt;

/// One of the auth fields kept in tab-scoped storage.
///
/// The string names are shared with every page of the panel and must not
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    Token,
    Username,
    /// JSON array of role names.
    Roles,
    RefreshToken,
    /// ISO-8601 timestamp.
    ExpiresAt,
}

impl SessionKey {
    /// Every key, in the order they are cleared.
    pub const ALL: [SessionKey; 5] = [
        SessionKey::Token,
        SessionKey::Username,
        SessionKey::Roles,
        SessionKey::RefreshToken,
        SessionKey::ExpiresAt,
    ];

    /// The storage name for this key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKey::Token => "auth.token",
            SessionKey::Username => "auth.username",
            SessionKey::Roles => "auth.roles",
            SessionKey::RefreshToken => "auth.refreshToken",
            SessionKey::ExpiresAt => "auth.expiresAt",
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
