//! Display formatting for receipts
//!
//! Money amounts are grouped with `,` every three digits. Times print as
//! `HH:MM` and dates as `dd/mm/yyyy`, whatever shape the order-entry side
//! handed us.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{FormatError, FormatResult};

/// Shown in place of a time that could not be parsed
pub const TIME_PLACEHOLDER: &str = "--:--";
/// Shown in place of a date that could not be parsed
pub const DATE_PLACEHOLDER: &str = "--/--/----";

const TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];
const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%Y-%m-%d"];

/// Group the digits of an amount in thousands: `1234567` -> `1,234,567`
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Parse a time from `HH:MM`, `HH:MM:SS`, RFC 3339 or a naive datetime
pub fn parse_time(raw: &str) -> FormatResult<NaiveTime> {
    let s = raw.trim();
    for fmt in TIME_FORMATS {
        if let Ok(t) = NaiveTime::parse_from_str(s, fmt) {
            return Ok(t);
        }
    }
    parse_datetime(s)
        .map(|dt| dt.time())
        .ok_or_else(|| FormatError::InvalidTime(raw.to_string()))
}

/// Parse a date from `dd/mm/yyyy`, `yyyy-mm-dd`, RFC 3339 or a naive datetime
pub fn parse_date(raw: &str) -> FormatResult<NaiveDate> {
    let s = raw.trim();
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    parse_datetime(s)
        .map(|dt| dt.date())
        .ok_or_else(|| FormatError::InvalidDate(raw.to_string()))
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// `HH:MM` label for a raw time, or [`TIME_PLACEHOLDER`]
pub fn time_label(raw: &str) -> String {
    match parse_time(raw) {
        Ok(t) => format_time(t),
        Err(e) => {
            tracing::debug!(error = %e, "time not displayable, using placeholder");
            TIME_PLACEHOLDER.to_string()
        }
    }
}

/// `dd/mm/yyyy` label for a raw date, or [`DATE_PLACEHOLDER`]
pub fn date_label(raw: &str) -> String {
    match parse_date(raw) {
        Ok(d) => format_date(d),
        Err(e) => {
            tracing::debug!(error = %e, "date not displayable, using placeholder");
            DATE_PLACEHOLDER.to_string()
        }
    }
}

pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

pub fn format_date(d: NaiveDate) -> String {
    d.format("%d/%m/%Y").to_string()
}
