//! Calendar-day arithmetic for due dates.
//!
//! Everything works on local calendar dates. Both the due date and "today"
//! are truncated to midnight before subtracting, so the time-of-day on
//! either side never shifts a loan across a bucket boundary.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Today as a local calendar date. Kept out of the pure functions so they
/// stay deterministic under test.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whole days between today and the due date. 0 means due today, positive
/// means still time, negative means overdue.
pub fn days_remaining(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

/// Parse a due date as the backend serializes it. Dates arrive either as
/// plain `YYYY-MM-DD`, as a `T`-separated datetime with or without fraction,
/// or as full RFC 3339; zoned timestamps are converted to the local calendar
/// day to match what staff see on screen. Returns `None` for anything else
/// so malformed records can be excluded instead of crashing a pass.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    // dd-MM-yyyy shows up in older exports
    NaiveDate::parse_from_str(raw, "%d-%m-%Y").ok()
}

/// Days remaining for a raw due-date string, or `None` when unparseable.
pub fn days_remaining_str(raw: &str, today: NaiveDate) -> Option<i64> {
    parse_due_date(raw).map(|due| days_remaining(due, today))
}
