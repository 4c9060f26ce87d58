//! Time and timestamp helpers.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// UTC timestamp used for `created_at` / `updated_at`.
pub type Timestamp = DateTime<Utc>;

/// Layout `SQLite` uses for `CURRENT_TIMESTAMP` (always UTC, no offset).
const SQLITE_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Render a timestamp as fixed-width RFC 3339 (microseconds, `Z` suffix).
///
/// Fixed width keeps textual ordering equal to chronological ordering,
/// which lets stores sort on the raw column.
#[must_use]
pub fn format(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Render a timestamp as RFC 3339 with millisecond precision, the form
/// ECMAScript `Date` is required to parse.
#[must_use]
pub fn format_millis(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 (what this workspace writes) as well as the bare
/// `YYYY-MM-DD HH:MM:SS` layout produced by `SQLite` defaults, which is
/// interpreted as UTC.
///
/// # Errors
///
/// Returns the RFC 3339 parse error when neither layout matches.
pub fn parse(text: &str) -> Result<Timestamp, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(text) {
        Ok(ts) => Ok(ts.to_utc()),
        Err(err) => NaiveDateTime::parse_from_str(text, SQLITE_LAYOUT)
            .map(|naive| naive.and_utc())
            .map_err(|_| err),
    }
}
