//! Next-occurrence math for recurring reminders.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone};

use crate::time::TimeOfDay;

/// Next occurrence of `time` on `weekday` (0 = Sunday) strictly after `now`.
///
/// If `weekday` is today and `time` has not yet come, the trigger is today;
/// if it has come (or is exactly now), the trigger is one week later.
pub fn next_weekly_trigger<Tz: TimeZone>(
    now: &DateTime<Tz>,
    weekday: u8,
    time: TimeOfDay,
) -> DateTime<Tz> {
    let today = now.date_naive();
    let current = i64::from(now.weekday().num_days_from_sunday());
    let mut delta = i64::from(weekday) - current;

    if delta < 0 {
        delta += 7;
    } else if delta == 0 && at_local(&now.timezone(), today, time) <= *now {
        delta = 7;
    }

    at_local(&now.timezone(), today + Duration::days(delta), time)
}

/// Next occurrence of `time` strictly after `now`, today or tomorrow.
pub fn next_daily_trigger<Tz: TimeZone>(now: &DateTime<Tz>, time: TimeOfDay) -> DateTime<Tz> {
    let today = now.date_naive();
    let candidate = at_local(&now.timezone(), today, time);
    if candidate > *now {
        candidate
    } else {
        at_local(&now.timezone(), today + Duration::days(1), time)
    }
}

fn at_local<Tz: TimeZone>(tz: &Tz, date: NaiveDate, time: TimeOfDay) -> DateTime<Tz> {
    let naive = date.and_time(time.to_naive_time());
    match tz.from_local_datetime(&naive).earliest() {
        Some(dt) => dt,
        // Wall-clock time skipped by a DST jump; fire an hour later.
        None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .unwrap_or_else(|| tz.from_utc_datetime(&naive)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Utc, Weekday};

    // 2026-10-16 is a Friday (weekday 5).
    fn friday(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, hour, minute, 0).unwrap()
    }

    fn eight_pm() -> TimeOfDay {
        TimeOfDay::new(20, 0).unwrap()
    }

    #[test]
    fn test_later_this_week() {
        let next = next_weekly_trigger(&friday(9, 0), 6, eight_pm());
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 10, 17, 20, 0, 0).unwrap());
        assert_eq!(next.weekday(), Weekday::Sat);
    }

    #[test]
    fn test_earlier_weekday_wraps_to_next_week() {
        let next = next_weekly_trigger(&friday(9, 0), 1, eight_pm());
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 10, 19, 20, 0, 0).unwrap());
        assert_eq!(next.weekday(), Weekday::Mon);
    }

    #[test]
    fn test_same_day_before_time_is_today() {
        let next = next_weekly_trigger(&friday(19, 59), 5, eight_pm());
        assert_eq!(next, friday(20, 0));
    }

    #[test]
    fn test_same_day_after_time_is_exactly_one_week_later() {
        let now = friday(20, 1);
        let next = next_weekly_trigger(&now, 5, eight_pm());
        assert_eq!(next, friday(20, 0) + Duration::days(7));
        assert_eq!(next.hour(), 20);
        assert_eq!(next.minute(), 0);
    }

    #[test]
    fn test_same_day_exactly_at_time_rolls_over() {
        let next = next_weekly_trigger(&friday(20, 0), 5, eight_pm());
        assert_eq!(next, friday(20, 0) + Duration::days(7));
    }

    #[test]
    fn test_seconds_and_millis_are_zeroed() {
        let now = Utc
            .with_ymd_and_hms(2026, 10, 16, 9, 0, 42)
            .unwrap()
            + Duration::milliseconds(123);
        let next = next_weekly_trigger(&now, 0, eight_pm());
        assert_eq!(next.second(), 0);
        assert_eq!(next.timestamp_subsec_millis(), 0);
        assert_eq!(next.weekday(), Weekday::Sun);
    }

    #[test]
    fn test_always_in_the_future() {
        for hour in [0, 8, 20, 23] {
            let now = friday(hour, 30);
            for day in 0..7 {
                let next = next_weekly_trigger(&now, day, eight_pm());
                assert!(next > now);
                assert!(next - now <= Duration::days(7));
                assert_eq!(next.weekday().num_days_from_sunday(), u32::from(day));
            }
        }
    }

    #[test]
    fn test_daily_rolls_to_tomorrow() {
        assert_eq!(next_daily_trigger(&friday(8, 0), eight_pm()), friday(20, 0));
        assert_eq!(
            next_daily_trigger(&friday(21, 0), eight_pm()),
            friday(20, 0) + Duration::days(1)
        );
    }
}
