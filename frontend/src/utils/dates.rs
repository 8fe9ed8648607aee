use chrono::{Datelike, Duration, NaiveDate};

/// Formats a calendar date as `YYYY-MM-DD` from its own fields; no time zone
/// is involved.
pub fn to_local_ymd(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Parses `YYYY-MM-DD` as a local calendar date. ISO date-times are accepted
/// and truncated to their date part, so `2024-03-01T00:00:00Z` is the 1st
/// regardless of the browser's offset.
pub fn parse_local_ymd(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    let (date_part, rest) = if trimmed.is_char_boundary(10) {
        trimmed.split_at(10)
    } else {
        (trimmed, "")
    };
    if !rest.is_empty() && !rest.starts_with(['T', ' ']) {
        return None;
    }
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

pub fn days_between_inclusive(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days().abs() + 1
}

pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.checked_add_signed(Duration::days(1)).unwrap_or(date)
}

pub fn today_local() -> NaiveDate {
    chrono::Local::now().date_naive()
}
