// Date/time parsing for server-supplied timestamps
//
// The API emits ISO-like date-times, sometimes with a space in place of the
// `T` separator and usually without an offset. Offset-less date-times are read
// in the local time zone; bare dates are UTC midnight.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Default display format for stage completion times
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Display format for date-only columns
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

// RFC 3339 requires seconds; these cover the shorter forms with an offset
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
];

/// Parse a progress timestamp
///
/// Returns None for anything unparseable; callers treat that as "no time".
pub fn parse_progress_time(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let normalized = normalize_separator(value);

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt);
    }

    let with_offset = match normalized.strip_suffix(|c: char| c == 'Z' || c == 'z') {
        Some(rest) => format!("{}+00:00", rest),
        None => normalized.clone(),
    };
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&with_offset, format) {
            return Some(dt);
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return local_instant(naive);
        }
    }

    if let Some(date) = parse_bare_date(&normalized) {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|midnight| Utc.from_utc_datetime(&midnight).fixed_offset());
    }

    log::debug!("dropping unparseable time value {:?}", value);
    None
}

fn normalize_separator(value: &str) -> String {
    if value.contains('T') {
        value.to_string()
    } else {
        value.replacen(' ', "T", 1)
    }
}

fn parse_bare_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

fn local_instant(naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    // Nonexistent local times (DST gaps) have no instant
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
}

/// Format a raw server timestamp for display, in local time
///
/// Bare dates keep their calendar day. Unparseable values are shown as-is
/// rather than hidden.
pub fn format_progress_time(value: &str, format: &str) -> String {
    if let Some(midnight) = parse_bare_date(value.trim()).and_then(|d| d.and_hms_opt(0, 0, 0)) {
        return midnight.format(format).to_string();
    }
    match parse_progress_time(value) {
        Some(dt) => dt.with_timezone(&Local).format(format).to_string(),
        None => value.to_string(),
    }
}

/// Format a raw server timestamp as a date only
pub fn format_progress_date(value: &str) -> String {
    format_progress_time(value, DATE_FORMAT)
}
