//! RFC 3339 parsing and display-zone formatting for the request boundary.
//!
//! Slot selection never looks at a display zone; conversion happens only when
//! results are handed back to a caller.

use chrono::{DateTime, SecondsFormat};
use chrono_tz::Tz;

use crate::error::SchedulerError;
use crate::interval::Timestamp;

/// Parse an RFC 3339 datetime, keeping its offset. Surrounding whitespace is
/// ignored.
///
/// # Errors
///
/// Returns [`SchedulerError::InvalidDatetime`] if the string is not valid
/// RFC 3339.
///
/// # Examples
///
/// ```
/// use slot_engine::temporal::parse_rfc3339;
///
/// let dt = parse_rfc3339(" 2025-08-02T09:00:00+05:30 ").unwrap();
/// assert_eq!(dt.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
/// ```
pub fn parse_rfc3339(s: &str) -> Result<Timestamp, SchedulerError> {
    let trimmed = s.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .map_err(|e| SchedulerError::InvalidDatetime(format!("'{trimmed}': {e}")))
}

/// Parse an IANA timezone name.
///
/// # Errors
///
/// Returns [`SchedulerError::InvalidTimezone`] for unknown names.
pub fn parse_timezone(s: &str) -> Result<Tz, SchedulerError> {
    s.parse::<Tz>()
        .map_err(|_| SchedulerError::InvalidTimezone(format!("'{s}' is not a valid IANA timezone")))
}

/// Render `dt` in `tz` as RFC 3339 with whole seconds; UTC renders as `Z`.
///
/// ```
/// use slot_engine::temporal::{format_in_zone, parse_rfc3339, parse_timezone};
///
/// let dt = parse_rfc3339("2025-08-02T14:00:00Z").unwrap();
/// let kolkata = parse_timezone("Asia/Kolkata").unwrap();
/// assert_eq!(format_in_zone(&dt, &kolkata), "2025-08-02T19:30:00+05:30");
/// ```
pub fn format_in_zone(dt: &Timestamp, tz: &Tz) -> String {
    dt.with_timezone(tz)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}
