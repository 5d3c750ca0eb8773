//! Expiry timestamp parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a stored `expiresAt` value.
///
/// Accepts RFC 3339, an offset-less date-time (read as UTC) and a bare date
/// (midnight UTC). Anything else yields `None`, which callers treat as
/// already expired.
pub fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(t.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc())
}
