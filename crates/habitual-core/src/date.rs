//! Local-calendar date handling.
//!
//! Log keys are `YYYY-MM-DD` strings in the user's local calendar, never UTC.
//! The scoring engine only ever sees a [`NaiveDate`] reference date passed in
//! by the caller; reading the clock happens here and nowhere else.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, TimeZone};

use crate::error::ValidationError;

/// Format used for every date key in the daily log.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's date in the machine's local time zone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Calendar date of `instant` as seen in its own time zone, zero-padded
/// in year-month-day order.
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use habitual_core::date::local_date_string;
///
/// // 23:30 on Jan 31 in UTC-3 is already Feb 1 in UTC.
/// let tz = FixedOffset::west_opt(3 * 3600).unwrap();
/// let instant = tz.with_ymd_and_hms(2024, 1, 31, 23, 30, 0).unwrap();
/// assert_eq!(local_date_string(&instant), "2024-01-31");
/// ```
pub fn local_date_string<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    format_date(instant.date_naive())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a strict `YYYY-MM-DD` log key.
pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = s.trim();
    // chrono accepts unpadded fields; log keys must be zero-padded.
    if trimmed.len() != 10 {
        return Err(ValidationError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday() as u64;
    days_before(date, offset)
}

/// `date` minus `n` days, saturating at the earliest representable date.
pub fn days_before(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN)
}

/// `date` plus `n` days, saturating at the latest representable date.
pub fn days_after(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_add_days(Days::new(n)).unwrap_or(NaiveDate::MAX)
}

/// The `n` days ending at `end` (inclusive), oldest first.
pub fn trailing_window(end: NaiveDate, n: u32) -> Vec<NaiveDate> {
    (0..n as u64).rev().map(|i| days_before(end, i)).collect()
}
