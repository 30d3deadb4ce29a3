//! Completion window helpers.
//!
//! Weeks start on Monday at local midnight.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone};

/// Milliseconds in one day.
pub const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Monday 00:00:00.000 of the week containing `now`, in `now`'s timezone.
///
/// Sunday belongs to the week that began the previous Monday.
pub fn start_of_week<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let monday = monday_of(now.date_naive());
    local_midnight(&now.timezone(), monday)
}

/// [`start_of_week`] as epoch milliseconds.
pub fn week_window_start_millis<Tz: TimeZone>(now: &DateTime<Tz>) -> i64 {
    start_of_week(now).timestamp_millis()
}

/// Start of a trailing window of `days` days ending at `now_millis`.
pub fn rolling_window_start(now_millis: i64, days: i64) -> i64 {
    now_millis.saturating_sub(days.saturating_mul(DAY_MILLIS))
}

/// Human-readable label such as `"Oct 23 - Oct 29 • Week 43"`.
pub fn week_label<Tz: TimeZone>(start: &DateTime<Tz>) -> String {
    let first = start.date_naive();
    let last = first + Duration::days(6);
    format!(
        "{} - {} • Week {}",
        first.format("%b %-d"),
        last.format("%b %-d"),
        first.iso_week().week()
    )
}

fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    match tz.from_local_datetime(&midnight).earliest() {
        Some(dt) => dt,
        // Midnight skipped by a DST transition; the day starts an hour later.
        None => tz
            .from_local_datetime(&(midnight + Duration::hours(1)))
            .earliest()
            .unwrap_or_else(|| tz.from_utc_datetime(&midnight)),
    }
}
