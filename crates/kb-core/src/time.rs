//! Human-readable rendering of time values.
//!
//! Year-or-coarser precisions render a bucketed year, optionally widened to a
//! year range by the uncertainty window. Finer precisions render a truncated
//! `YYYY.MM[.DD[ hh[:mm[:ss]]]]` stamp, and an uncertainty window is applied
//! with calendar arithmetic before truncating both endpoints.
//!
//! Negative years and years past 9999 are not supported.

use std::cmp::Ordering;
use std::fmt::Write;

use chrono::{DateTime, Datelike, Days, Duration, Months, Timelike, Utc};
use tracing::warn;

use crate::defaults::TIME_RANGE_SEPARATOR;
use crate::models::{TimePrecision, TimeValue};

/// Render a time value at its precision.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use kb_core::models::{TimePrecision, TimeValue};
/// use kb_core::time::format_time;
///
/// let t = TimeValue::new(Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap(), TimePrecision::Year)
///     .with_window(5, 3);
/// assert_eq!(format_time(&t), "1995 – 2003");
/// ```
pub fn format_time(time: &TimeValue) -> String {
    if let Some(unit) = time.precision.year_unit() {
        let year = bucket_year(time.value.year(), unit);
        return match time.window() {
            Some((before, after)) => {
                let unit = i64::from(unit);
                format!(
                    "{}{}{}",
                    i64::from(year) - unit * i64::from(before),
                    TIME_RANGE_SEPARATOR,
                    i64::from(year) + unit * i64::from(after)
                )
            }
            None => year.to_string(),
        };
    }

    if let Some((before, after)) = time.window() {
        let start = shift(time.value, time.precision, before, false);
        let end = shift(time.value, time.precision, after, true);
        match (start, end) {
            (Some(start), Some(end)) => {
                return format!(
                    "{}{}{}",
                    to_precision_string(&start, time.precision),
                    TIME_RANGE_SEPARATOR,
                    to_precision_string(&end, time.precision)
                );
            }
            _ => {
                warn!(
                    subsystem = "core",
                    value = %time.value,
                    precision = %time.precision,
                    before,
                    after,
                    "Time window leaves the supported calendar, rendering the point value"
                );
            }
        }
    }

    to_precision_string(&time.value, time.precision)
}

/// Truncate a timestamp to `precision`: `YYYY.MM`, then `.DD`, ` hh`, `:mm`
/// and `:ss` as the precision reaches day, hour, minute and second.
///
/// Precisions coarser than month still render year and month.
pub fn to_precision_string(value: &DateTime<Utc>, precision: TimePrecision) -> String {
    let mut out = format!("{:04}.{:02}", value.year(), value.month());
    // Writing into a String cannot fail.
    if precision >= TimePrecision::Day {
        let _ = write!(out, ".{:02}", value.day());
    }
    if precision >= TimePrecision::Hour {
        let _ = write!(out, " {:02}", value.hour());
    }
    if precision >= TimePrecision::Minute {
        let _ = write!(out, ":{:02}", value.minute());
    }
    if precision >= TimePrecision::Second {
        let _ = write!(out, ":{:02}", value.second());
    }
    out
}

/// Round `year` to the nearest multiple of `unit`, ties to the even multiple.
pub fn bucket_year(year: i32, unit: i32) -> i32 {
    if unit <= 1 {
        return year;
    }
    let quotient = year.div_euclid(unit);
    let remainder = year.rem_euclid(unit);
    let rounded = match (2 * remainder).cmp(&unit) {
        Ordering::Less => quotient,
        Ordering::Greater => quotient + 1,
        Ordering::Equal if quotient.rem_euclid(2) == 0 => quotient,
        Ordering::Equal => quotient + 1,
    };
    rounded * unit
}

/// Move `value` by `amount` precision units. Month steps clamp to the end of
/// shorter months. Returns `None` on calendar overflow.
fn shift(
    value: DateTime<Utc>,
    precision: TimePrecision,
    amount: u32,
    forward: bool,
) -> Option<DateTime<Utc>> {
    match precision {
        TimePrecision::Month => {
            let months = Months::new(amount);
            if forward {
                value.checked_add_months(months)
            } else {
                value.checked_sub_months(months)
            }
        }
        TimePrecision::Day => {
            let days = Days::new(u64::from(amount));
            if forward {
                value.checked_add_days(days)
            } else {
                value.checked_sub_days(days)
            }
        }
        TimePrecision::Hour | TimePrecision::Minute | TimePrecision::Second => {
            let amount = i64::from(amount);
            let delta = match precision {
                TimePrecision::Hour => Duration::hours(amount),
                TimePrecision::Minute => Duration::minutes(amount),
                _ => Duration::seconds(amount),
            };
            if forward {
                value.checked_add_signed(delta)
            } else {
                value.checked_sub_signed(delta)
            }
        }
        _ => Some(value),
    }
}

impl std::fmt::Display for TimeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_time(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn time(value: DateTime<Utc>, precision: TimePrecision) -> TimeValue {
        TimeValue::new(value, precision)
    }

    #[test]
    fn test_year_with_window() {
        let t = time(at(2000, 1, 1, 0, 0, 0), TimePrecision::Year).with_window(5, 3);
        assert_eq!(format_time(&t), "1995 – 2003");
    }

    #[test]
    fn test_year_without_window() {
        let t = time(at(1987, 6, 15, 0, 0, 0), TimePrecision::Year);
        assert_eq!(format_time(&t), "1987");
    }

    #[test]
    fn test_zero_window_renders_single_year() {
        let t = time(at(1987, 6, 15, 0, 0, 0), TimePrecision::Year).with_window(0, 0);
        assert_eq!(format_time(&t), "1987");
    }

    #[test]
    fn test_millennium_bucket() {
        let t = time(at(1687, 1, 1, 0, 0, 0), TimePrecision::Millennium);
        assert_eq!(format_time(&t), "2000");
        let t = time(at(1400, 1, 1, 0, 0, 0), TimePrecision::Millennium).with_window(1, 0);
        assert_eq!(format_time(&t), "0 – 1000");
    }

    #[test]
    fn test_century_bucket_with_window() {
        let t = time(at(1923, 1, 1, 0, 0, 0), TimePrecision::Century).with_window(1, 2);
        assert_eq!(format_time(&t), "1800 – 2100");
    }

    #[test]
    fn test_decade_bucket() {
        let t = time(at(1987, 1, 1, 0, 0, 0), TimePrecision::Decade);
        assert_eq!(format_time(&t), "1990");
        let t = time(at(1983, 1, 1, 0, 0, 0), TimePrecision::Decade).with_window(2, 0);
        assert_eq!(format_time(&t), "1960 – 1980");
    }

    #[test]
    fn test_bucket_ties_round_to_even() {
        assert_eq!(bucket_year(1950, 100), 2000);
        assert_eq!(bucket_year(1850, 100), 1800);
        assert_eq!(bucket_year(1985, 10), 1980);
        assert_eq!(bucket_year(1995, 10), 2000);
        assert_eq!(bucket_year(1500, 1000), 2000);
        assert_eq!(bucket_year(2500, 1000), 2000);
        assert_eq!(bucket_year(1234, 1), 1234);
    }

    #[test]
    fn test_day_truncation() {
        let t = time(at(1999, 7, 4, 13, 45, 10), TimePrecision::Day);
        assert_eq!(format_time(&t), "1999.07.04");
    }

    #[test]
    fn test_truncation_at_every_fine_precision() {
        let v = at(2021, 3, 9, 8, 5, 7);
        assert_eq!(to_precision_string(&v, TimePrecision::Month), "2021.03");
        assert_eq!(to_precision_string(&v, TimePrecision::Day), "2021.03.09");
        assert_eq!(to_precision_string(&v, TimePrecision::Hour), "2021.03.09 08");
        assert_eq!(to_precision_string(&v, TimePrecision::Minute), "2021.03.09 08:05");
        assert_eq!(to_precision_string(&v, TimePrecision::Second), "2021.03.09 08:05:07");
    }

    #[test]
    fn test_year_is_zero_padded() {
        let v = at(812, 12, 25, 0, 0, 0);
        assert_eq!(to_precision_string(&v, TimePrecision::Day), "0812.12.25");
    }

    #[test]
    fn test_month_window_clamps_to_month_end() {
        let t = time(at(2021, 3, 31, 0, 0, 0), TimePrecision::Day);
        assert_eq!(format_time(&t), "2021.03.31");

        let t = time(at(2021, 3, 31, 0, 0, 0), TimePrecision::Month).with_window(1, 1);
        // Feb 2021 has 28 days, Apr has 30; only year and month are shown
        assert_eq!(format_time(&t), "2021.02 – 2021.04");
    }

    #[test]
    fn test_month_window_crosses_years() {
        let t = time(at(2020, 11, 15, 0, 0, 0), TimePrecision::Month).with_window(12, 3);
        assert_eq!(format_time(&t), "2019.11 – 2021.02");
    }

    #[test]
    fn test_day_window_respects_leap_years() {
        let t = time(at(2024, 2, 28, 0, 0, 0), TimePrecision::Day).with_window(0, 1);
        assert_eq!(format_time(&t), "2024.02.28 – 2024.02.29");
        let t = time(at(2023, 2, 28, 0, 0, 0), TimePrecision::Day).with_window(0, 1);
        assert_eq!(format_time(&t), "2023.02.28 – 2023.03.01");
    }

    #[test]
    fn test_hour_window_crosses_midnight() {
        let t = time(at(1999, 12, 31, 22, 0, 0), TimePrecision::Hour).with_window(1, 3);
        assert_eq!(format_time(&t), "1999.12.31 21 – 2000.01.01 01");
    }

    #[test]
    fn test_minute_and_second_windows() {
        let t = time(at(2010, 5, 1, 12, 0, 30), TimePrecision::Minute).with_window(1, 61);
        assert_eq!(format_time(&t), "2010.05.01 11:59 – 2010.05.01 13:01");

        let t = time(at(2010, 5, 1, 12, 0, 30), TimePrecision::Second).with_window(31, 30);
        assert_eq!(format_time(&t), "2010.05.01 11:59:59 – 2010.05.01 12:01:00");
    }

    #[test]
    fn test_overflowing_month_window_renders_point_value() {
        let t = time(at(1, 1, 1, 0, 0, 0), TimePrecision::Month).with_window(u32::MAX, u32::MAX);
        assert_eq!(format_time(&t), "0001.01");
    }

    #[test]
    fn test_overflowing_day_window_renders_point_value() {
        let t = time(at(1, 1, 1, 0, 0, 0), TimePrecision::Day).with_window(u32::MAX, u32::MAX);
        assert_eq!(format_time(&t), "0001.01.01");
    }

    #[test]
    fn test_overflowing_hour_window_renders_point_value() {
        let t = time(at(1, 1, 1, 0, 0, 0), TimePrecision::Hour).with_window(u32::MAX, u32::MAX);
        assert_eq!(format_time(&t), "0001.01.01 00");
    }

    #[test]
    fn test_window_overflowing_one_side_renders_point_value() {
        // The forward side fits; the backward side crosses chrono's minimum date
        let t = time(at(1, 1, 1, 0, 0, 0), TimePrecision::Day).with_window(u32::MAX, 1);
        assert_eq!(format_time(&t), "0001.01.01");
    }

    #[test]
    fn test_one_sided_window_is_ignored() {
        let t = TimeValue {
            before: Some(2),
            ..time(at(1999, 7, 4, 0, 0, 0), TimePrecision::Day)
        };
        assert_eq!(format_time(&t), "1999.07.04");
    }

    #[test]
    fn test_display_matches_format_time() {
        let t = time(at(1999, 7, 4, 0, 0, 0), TimePrecision::Day).with_window(1, 0);
        assert_eq!(t.to_string(), format_time(&t));
        assert_eq!(t.to_string(), "1999.07.03 – 1999.07.04");
    }
}
