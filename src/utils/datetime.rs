//! Date and time helpers
//!
//! Timestamps are persisted in UTC and presented in the local time zone.

use chrono::{DateTime, Local, Utc};

/// Format used for report output and generated file headers.
pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Convert a stored UTC instant to the local time zone.
pub fn utc_to_local(instant: DateTime<Utc>) -> DateTime<Local> {
    instant.with_timezone(&Local)
}

/// Current instant in UTC, as written to audit columns.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Format a local timestamp as YYYY-MM-DD.
pub fn format_local_date(instant: DateTime<Local>) -> String {
    instant.format(DISPLAY_DATE_FORMAT).to_string()
}
