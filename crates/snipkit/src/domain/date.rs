//! Date utilities
//!
//! All functions work on wall-clock `NaiveDateTime` values; no time zone
//! conversion takes place.

use crate::constants::{ISO_DATE_FORMAT, MS_PER_DAY};
use crate::infra::clock::Clock;
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

/// Day of the year, counting January 1st as day 1
///
/// Computed as whole days elapsed since "January 0" (midnight of December 31st
/// of the previous year).
pub fn day_of_year(dt: NaiveDateTime) -> i64 {
    let jan_zero = NaiveDate::from_yo_opt(dt.year(), 1)
        .and_then(|jan_one| jan_one.pred_opt())
        .and_then(|d| d.and_hms_opt(0, 0, 0));

    match jan_zero {
        Some(start) => (dt - start).num_days(),
        // January 0 falls outside chrono's range
        None => i64::from(dt.ordinal()),
    }
}

/// Time of day as `HH:MM:SS`
pub fn colon_time(dt: NaiveDateTime) -> String {
    dt.format("%H:%M:%S").to_string()
}

/// Difference in days between two instants, possibly fractional
///
/// Positive when `final_date` is after `initial`.
pub fn days_between(initial: NaiveDateTime, final_date: NaiveDateTime) -> f64 {
    (final_date - initial).num_milliseconds() as f64 / MS_PER_DAY
}

/// Check whether `a` is strictly after `b`
#[inline]
pub fn is_after_date(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a > b
}

/// Check whether `a` is strictly before `b`
#[inline]
pub fn is_before_date(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a < b
}

/// Check whether `a` and `b` denote the same instant
#[inline]
pub fn is_same_date(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a == b
}

/// Latest of the given dates, `None` when empty
pub fn max_date(dates: &[NaiveDateTime]) -> Option<NaiveDateTime> {
    dates.iter().copied().max()
}

/// Earliest of the given dates, `None` when empty
pub fn min_date(dates: &[NaiveDateTime]) -> Option<NaiveDateTime> {
    dates.iter().copied().min()
}

/// Tomorrow's local date as `YYYY-MM-DD`
///
/// Uses the clock's local calendar date, so the result never lags behind
/// near midnight in time zones ahead of UTC.
pub fn tomorrow<C: Clock + ?Sized>(clock: &C) -> String {
    let today = clock.now().date();
    today
        .checked_add_days(Days::new(1))
        .unwrap_or(today)
        .format(ISO_DATE_FORMAT)
        .to_string()
}
