// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Production-week resolution.
//!
//! This module converts a calendar date into a production week index and
//! label:
//! - With a known shooting start, weeks are counted from the Monday of the
//!   week the shoot begins in ("week 1"), seven days apiece.
//! - Without one, the ISO-8601 calendar week is used as a fallback.
//!
//! ## Invariants
//!
//! - The resolver is total: every date yields a result.
//! - Dates before the shooting start may yield week ≤ 0; callers display
//!   such values rather than rejecting them.
//! - Day counting happens on plain calendar dates, so clock changes cannot
//!   introduce off-by-one weeks.

use chrono::{Datelike, Duration, NaiveDate};
use time::Date;

/// The resolved production week for a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekInfo {
    /// The 1-based week index (may be ≤ 0 before the shooting start).
    pub week: i64,
    /// A display label for the week (e.g. "Week 3").
    pub label: String,
    /// The Monday the week starts on.
    pub week_start: Date,
}

/// Resolves the production week for a date.
///
/// # Arguments
///
/// * `date` - The date to resolve
/// * `shooting_start` - The first day of principal photography, if known
///
/// # Returns
///
/// The week index, its display label, and the Monday the week starts on.
/// With a shooting start the index is anchored to the shoot (the week
/// containing the start date is week 1); otherwise the ISO-8601 calendar
/// week number is used.
#[must_use]
pub fn week_info(date: Date, shooting_start: Option<Date>) -> WeekInfo {
    shooting_start.map_or_else(
        || iso_week_info(date),
        |start| shooting_week_info(date, start),
    )
}

/// Resolves a week anchored to the shooting start.
fn shooting_week_info(date: Date, shooting_start: Date) -> WeekInfo {
    let aligned_start = align_to_monday(to_naive(shooting_start));
    let days = (to_naive(date) - aligned_start).num_days();
    let week = days.div_euclid(7) + 1;
    let week_start = aligned_start + Duration::days((week - 1) * 7);

    WeekInfo {
        week,
        label: format!("Week {week}"),
        week_start: to_date(week_start),
    }
}

/// Resolves the ISO-8601 calendar week (fallback without a shooting start).
fn iso_week_info(date: Date) -> WeekInfo {
    let naive = to_naive(date);
    let week = i64::from(naive.iso_week().week());
    let week_start = align_to_monday(naive);

    WeekInfo {
        week,
        label: format!("Week {week}"),
        week_start: to_date(week_start),
    }
}

/// Aligns a date to the preceding (or same) Monday.
fn align_to_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Converts a `time::Date` to a `chrono::NaiveDate`.
///
/// chrono's supported year range exceeds time's, so the conversion cannot
/// fail for any constructible `time::Date`.
fn to_naive(date: Date) -> NaiveDate {
    NaiveDate::from_ymd_opt(
        date.year(),
        u32::from(u8::from(date.month())),
        u32::from(date.day()),
    )
    .unwrap_or_default()
}

/// Converts a `chrono::NaiveDate` back to a `time::Date`.
///
/// Dates produced by week arithmetic on valid inputs stay well inside
/// time's supported range; out-of-range results clamp to the epoch rather
/// than panic.
fn to_date(naive: NaiveDate) -> Date {
    #[allow(clippy::cast_possible_truncation)]
    let month = naive.month() as u8;
    #[allow(clippy::cast_possible_truncation)]
    let day = naive.day() as u8;
    time::Month::try_from(month)
        .ok()
        .and_then(|m| Date::from_calendar_date(naive.year(), m, day).ok())
        .unwrap_or(Date::MIN)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::Month;

    fn date(year: i32, month: Month, day: u8) -> Date {
        Date::from_calendar_date(year, month, day).unwrap()
    }

    #[test]
    fn test_week_one_contains_shooting_start() {
        // Shooting starts Wednesday March 6, 2024; its week begins Monday March 4
        let start = date(2024, Month::March, 6);
        let info = week_info(date(2024, Month::March, 6), Some(start));

        assert_eq!(info.week, 1);
        assert_eq!(info.label, "Week 1");
        assert_eq!(info.week_start, date(2024, Month::March, 4));
    }

    #[test]
    fn test_days_before_aligned_start_still_week_one() {
        // Monday and Tuesday of the start week belong to week 1 even though
        // they precede the shooting start itself
        let start = date(2024, Month::March, 6);
        let info = week_info(date(2024, Month::March, 4), Some(start));

        assert_eq!(info.week, 1);
    }

    #[test]
    fn test_second_week_starts_next_monday() {
        let start = date(2024, Month::March, 6);
        let info = week_info(date(2024, Month::March, 11), Some(start));

        assert_eq!(info.week, 2);
        assert_eq!(info.week_start, date(2024, Month::March, 11));
    }

    #[test]
    fn test_week_is_non_decreasing_in_seven_day_steps() {
        let start = date(2024, Month::March, 4);
        let mut current = start;
        let mut previous_week = week_info(current, Some(start)).week;

        for _ in 0..10 {
            current = current.saturating_add(time::Duration::days(7));
            let week = week_info(current, Some(start)).week;
            assert!(week >= previous_week);
            assert_eq!(week, previous_week + 1);
            previous_week = week;
        }
    }

    #[test]
    fn test_date_before_shooting_start_yields_non_positive_week() {
        let start = date(2024, Month::March, 4);
        let info = week_info(date(2024, Month::February, 26), Some(start));

        assert_eq!(info.week, 0);
    }

    #[test]
    fn test_iso_fallback_without_shooting_start() {
        // January 4 is always inside ISO week 1
        let info = week_info(date(2024, Month::January, 4), None);

        assert_eq!(info.week, 1);
        assert_eq!(info.week_start, date(2024, Month::January, 1));
    }

    #[test]
    fn test_iso_fallback_week_start_is_monday() {
        let info = week_info(date(2024, Month::March, 10), None);

        assert_eq!(info.week_start, date(2024, Month::March, 4));
        assert_eq!(info.week_start.weekday(), time::Weekday::Monday);
    }
}
