//! Date helper functions

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::i18n::Locale;

/// Output of [`format_datetime_str`] for input that is not a date
pub const INVALID_DATE: &str = "Invalid Date";

/// Format a point in time as a long-form date in the given locale.
///
/// The instant is converted into `tz` first, so one locale/timezone
/// configuration always produces the same string for the same instant.
///
/// # Examples
/// ```ignore
/// format_datetime(&dt, Locale::En, &chrono_tz::UTC) // -> "January 5, 2024"
/// ```
pub fn format_datetime<Tz: TimeZone>(date: &DateTime<Utc>, locale: Locale, tz: &Tz) -> String {
    let local = date.with_timezone(tz);
    locale.long_date(local.year(), local.month(), local.day())
}

/// Format raw, unvalidated input; yields [`INVALID_DATE`] instead of failing
pub fn format_datetime_str<Tz: TimeZone>(input: &str, locale: Locale, tz: &Tz) -> String {
    match parse_datetime(input, tz) {
        Some(dt) => format_datetime(&dt, locale, tz),
        None => INVALID_DATE.to_string(),
    }
}

/// Format a date in ISO 8601 / XML format
pub fn date_xml(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Format a date for RSS `pubDate`
pub fn date_rfc2822(date: &DateTime<Utc>) -> String {
    date.to_rfc2822()
}

/// Parse a front-matter date in the formats authors actually write.
///
/// Values carrying an offset are taken as is; the rest are wall-clock times
/// in `tz`.
pub fn parse_datetime<Tz: TimeZone>(s: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    let naive = datetime_formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            ["%Y-%m-%d", "%Y/%m/%d"]
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
