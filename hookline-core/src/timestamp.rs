//! Rendering of event timestamps for display.
//!
//! Every timestamp shown to a reader goes through [`format_instant`], which
//! produces the fixed form `21st March 2024 - 10:30 AM UTC`. Raw strings from
//! payloads go through [`format_timestamp`], which never fails: input it cannot
//! parse comes back unchanged, so an already-formatted string is a fixed point.

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc,
};

/// Offset-bearing layouts tried after RFC 3339.
const OFFSET_LAYOUTS: [&str; 2] =
    ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M:%S%.f%z"];

/// Offset-less layouts; the wall clock is taken as UTC.
const NAIVE_LAYOUTS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Render a raw timestamp string for display, or echo it back verbatim when
/// it does not parse.
pub fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(instant) => format_instant(&instant),
        None => raw.to_string(),
    }
}

/// Render an instant as `{day}{suffix} {Month} {Year} - {hh:mm} {AM|PM} UTC`.
pub fn format_instant<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    let utc = instant.with_timezone(&Utc);
    let day = utc.day();
    format!(
        "{day}{} {}",
        ordinal_suffix(day),
        utc.format("%B %Y - %I:%M %p UTC")
    )
}

/// Parse an ISO-8601 timestamp into a UTC instant.
///
/// A trailing `Z` is treated as `+00:00`. Timestamps without an offset, and
/// bare dates, are interpreted as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = normalize_zone_marker(trimmed);

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(parsed.with_timezone(&Utc));
    }

    for layout in OFFSET_LAYOUTS {
        if let Ok(parsed) =
            DateTime::<FixedOffset>::parse_from_str(&normalized, layout)
        {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, layout) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// English ordinal suffix for a day of the month.
pub fn ordinal_suffix(day: u32) -> &'static str {
    if (4..=20).contains(&day) || (24..=30).contains(&day) {
        return "th";
    }

    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

fn normalize_zone_marker(raw: &str) -> String {
    match raw.strip_suffix(['Z', 'z']) {
        Some(stripped) => format!("{stripped}+00:00"),
        None => raw.to_string(),
    }
}
