use chrono::{Datelike, Duration, NaiveDate};

use crate::error::HabitError;

pub const ISO_DATE: &str = "%Y-%m-%d";

/// Parse a canonical `YYYY-MM-DD` string. Anything else is rejected.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, HabitError> {
    // chrono accepts unpadded and space-padded fields; the stored form must stay lexically sortable
    let invalid = || HabitError::InvalidDate(s.to_string());
    let date = NaiveDate::parse_from_str(s, ISO_DATE).map_err(|_| invalid())?;
    if format_iso_date(date) != s {
        return Err(invalid());
    }
    Ok(date)
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

/// Parse `YYYY-MM` into the first day of that month.
pub fn parse_month(s: &str) -> Result<NaiveDate, HabitError> {
    parse_iso_date(&format!("{}-01", s)).map_err(|_| HabitError::InvalidMonth(s.to_string()))
}

/// Whole calendar days from `earlier` to `later`; negative when `later` is before `earlier`.
pub fn days_between(later: NaiveDate, earlier: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

pub fn same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}

pub fn yesterday(today: NaiveDate) -> NaiveDate {
    today - Duration::days(1)
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    let first = month_start(date);
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next.map(yesterday).unwrap_or(first)
}

/// Every day from `start` to `end`, both inclusive. Empty when `end < start`.
pub fn each_day(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}
