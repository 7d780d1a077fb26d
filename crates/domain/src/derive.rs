// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transport and reinforcement date derivation.
//!
//! Given a resolved reference range, this module produces the concrete
//! dated entries for a request: the pickup/usage/dropoff legs of a transport
//! round trip, or the day span of a prelight/shooting/demontage phase.
//!
//! ## Invariants
//!
//! - Pickup legs never land on a Sunday: they shift backward to Saturday.
//! - Dropoff legs never land on a Sunday: they shift forward to Monday.
//! - Usage, shooting, and reinforcement days are NOT shifted off Sundays.
//!   The asymmetry is deliberate: crews shoot on Sundays, suppliers close.
//! - Derivation is pure; persistence and confirmation happen elsewhere.

use crate::reference::ReferenceRange;
use crate::types::{LinkPhase, RequestKind};
use time::{Date, Duration, Weekday};

/// The direction a Sunday date is pushed in to avoid the closure day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    /// Shift to the preceding Saturday (pickups, backward moves).
    Backward,
    /// Shift to the following Monday (dropoffs, forward moves).
    Forward,
}

/// Moves a date off Sunday in the given direction.
///
/// Non-Sunday dates pass through unchanged.
#[must_use]
pub fn avoid_sunday(date: Date, direction: ShiftDirection) -> Date {
    if date.weekday() == Weekday::Sunday {
        match direction {
            ShiftDirection::Backward => date.saturating_sub(Duration::days(1)),
            ShiftDirection::Forward => date.saturating_add(Duration::days(1)),
        }
    } else {
        date
    }
}

/// How transport dates are derived against a multi-day location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundTripMode {
    /// Anchor everything on the first day of the range.
    FirstDayOnly,
    /// Cover the whole range: pickup two days before the first day,
    /// dropoff the day after the last.
    FullDuration,
}

/// One derived leg of a transport round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedLeg {
    /// The kind of the leg.
    pub kind: RequestKind,
    /// The day the leg occurs, after Sunday avoidance.
    pub date: Date,
    /// Signed day distance from the leg's anchor (range start for pickup
    /// and usage, range end for dropoff in full-duration mode).
    pub day_offset: i64,
}

/// Derives the pickup/usage/dropoff legs of a transport round trip.
///
/// # Arguments
///
/// * `range` - The resolved reference range
/// * `mode` - First-day-only or full-duration derivation
///
/// # Returns
///
/// Exactly three legs. In first-day-only mode: pickup the day before the
/// reference, usage on it, dropoff the day after. In full-duration mode:
/// pickup two days before the first day, usage anchored on the first day
/// for display, dropoff the day after the last. Pickup and dropoff dates
/// are shifted off Sundays; the usage date never is.
#[must_use]
pub fn derive_round_trip(range: &ReferenceRange, mode: RoundTripMode) -> Vec<DerivedLeg> {
    let (pickup_date, pickup_offset, dropoff_date) = match mode {
        RoundTripMode::FirstDayOnly => (
            range.first_date.saturating_sub(Duration::days(1)),
            -1,
            range.first_date.saturating_add(Duration::days(1)),
        ),
        RoundTripMode::FullDuration => (
            range.first_date.saturating_sub(Duration::days(2)),
            -2,
            range.last_date.saturating_add(Duration::days(1)),
        ),
    };

    vec![
        DerivedLeg {
            kind: RequestKind::Pickup,
            date: avoid_sunday(pickup_date, ShiftDirection::Backward),
            day_offset: pickup_offset,
        },
        DerivedLeg {
            kind: RequestKind::Usage,
            date: range.first_date,
            day_offset: 0,
        },
        DerivedLeg {
            kind: RequestKind::Dropoff,
            date: avoid_sunday(dropoff_date, ShiftDirection::Forward),
            day_offset: 1,
        },
    ]
}

/// Derives the day span of a phase relative to a reference range.
///
/// # Arguments
///
/// * `phase` - The phase to derive
/// * `range` - The resolved reference range
/// * `duration` - The number of days the phase covers (clamped to ≥ 1)
///
/// # Returns
///
/// `(date, day_offset)` pairs:
/// - `Prelight`: `duration` days ending the day before the range starts,
///   offsets `-duration ..= -1` relative to the first day.
/// - `Shooting`: a single day on the range start, offset 0.
/// - `Demontage`: `duration` days starting the day after the range ends,
///   offsets `1 ..= duration` relative to the last day.
///
/// None of these dates are shifted off Sundays.
#[must_use]
pub fn derive_phase_days(
    phase: LinkPhase,
    range: &ReferenceRange,
    duration: u32,
) -> Vec<(Date, i64)> {
    let duration = i64::from(duration.max(1));

    match phase {
        LinkPhase::Prelight => (1..=duration)
            .map(|i| {
                let offset = i - duration - 1;
                (
                    range.first_date.saturating_add(Duration::days(offset)),
                    offset,
                )
            })
            .collect(),
        LinkPhase::Shooting => vec![(range.first_date, 0)],
        LinkPhase::Demontage => (1..=duration)
            .map(|i| (range.last_date.saturating_add(Duration::days(i)), i))
            .collect(),
    }
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
    fn test_avoid_sunday_passes_weekdays_through() {
        let friday = date(2024, Month::March, 8);

        assert_eq!(avoid_sunday(friday, ShiftDirection::Backward), friday);
        assert_eq!(avoid_sunday(friday, ShiftDirection::Forward), friday);
    }

    #[test]
    fn test_avoid_sunday_shifts_backward_to_saturday() {
        let sunday = date(2024, Month::March, 10);

        assert_eq!(
            avoid_sunday(sunday, ShiftDirection::Backward),
            date(2024, Month::March, 9)
        );
    }

    #[test]
    fn test_avoid_sunday_shifts_forward_to_monday() {
        let sunday = date(2024, Month::March, 10);

        assert_eq!(
            avoid_sunday(sunday, ShiftDirection::Forward),
            date(2024, Month::March, 11)
        );
    }

    #[test]
    fn test_round_trip_brackets_the_reference_day() {
        // Wednesday March 13, 2024 - nothing Sunday-adjacent
        let range = ReferenceRange::single_day(date(2024, Month::March, 13));

        let legs = derive_round_trip(&range, RoundTripMode::FirstDayOnly);

        assert_eq!(legs.len(), 3);
        assert_eq!(legs[0].kind, RequestKind::Pickup);
        assert_eq!(legs[0].date, date(2024, Month::March, 12));
        assert_eq!(legs[0].day_offset, -1);
        assert_eq!(legs[1].kind, RequestKind::Usage);
        assert_eq!(legs[1].date, date(2024, Month::March, 13));
        assert_eq!(legs[2].kind, RequestKind::Dropoff);
        assert_eq!(legs[2].date, date(2024, Month::March, 14));
        assert_eq!(legs[2].day_offset, 1);
    }

    #[test]
    fn test_round_trip_pickup_before_monday_lands_on_saturday() {
        // Usage on Monday March 11 puts the raw pickup on Sunday the 10th
        let range = ReferenceRange::single_day(date(2024, Month::March, 11));

        let legs = derive_round_trip(&range, RoundTripMode::FirstDayOnly);

        assert_eq!(legs[0].date, date(2024, Month::March, 9));
        assert_eq!(legs[0].date.weekday(), Weekday::Saturday);
    }

    #[test]
    fn test_round_trip_dropoff_after_saturday_lands_on_monday() {
        // Usage on Saturday March 9 puts the raw dropoff on Sunday the 10th
        let range = ReferenceRange::single_day(date(2024, Month::March, 9));

        let legs = derive_round_trip(&range, RoundTripMode::FirstDayOnly);

        assert_eq!(legs[2].date, date(2024, Month::March, 11));
        assert_eq!(legs[2].date.weekday(), Weekday::Monday);
    }

    #[test]
    fn test_round_trip_usage_stays_on_sunday() {
        // Shooting on a Sunday is legitimate; only the transport legs move
        let range = ReferenceRange::single_day(date(2024, Month::March, 10));

        let legs = derive_round_trip(&range, RoundTripMode::FirstDayOnly);

        assert_eq!(legs[1].date, date(2024, Month::March, 10));
        assert_eq!(legs[0].date, date(2024, Month::March, 9));
        assert_eq!(legs[2].date, date(2024, Month::March, 11));
    }

    #[test]
    fn test_full_duration_covers_the_whole_range() {
        let range = ReferenceRange {
            first_date: date(2024, Month::March, 13),
            last_date: date(2024, Month::March, 15),
        };

        let legs = derive_round_trip(&range, RoundTripMode::FullDuration);

        assert_eq!(legs[0].date, date(2024, Month::March, 11));
        assert_eq!(legs[0].day_offset, -2);
        assert_eq!(legs[1].date, date(2024, Month::March, 13));
        assert_eq!(legs[2].date, date(2024, Month::March, 16));
    }

    #[test]
    fn test_prelight_days_end_the_day_before_the_range() {
        let range = ReferenceRange::single_day(date(2024, Month::March, 10));

        let days = derive_phase_days(LinkPhase::Prelight, &range, 3);

        assert_eq!(
            days,
            vec![
                (date(2024, Month::March, 7), -3),
                (date(2024, Month::March, 8), -2),
                (date(2024, Month::March, 9), -1),
            ]
        );
    }

    #[test]
    fn test_shooting_is_a_single_day_on_the_range_start() {
        let range = ReferenceRange {
            first_date: date(2024, Month::March, 13),
            last_date: date(2024, Month::March, 15),
        };

        let days = derive_phase_days(LinkPhase::Shooting, &range, 4);

        assert_eq!(days, vec![(date(2024, Month::March, 13), 0)]);
    }

    #[test]
    fn test_demontage_days_start_the_day_after_the_range() {
        let range = ReferenceRange {
            first_date: date(2024, Month::March, 13),
            last_date: date(2024, Month::March, 15),
        };

        let days = derive_phase_days(LinkPhase::Demontage, &range, 2);

        assert_eq!(
            days,
            vec![
                (date(2024, Month::March, 16), 1),
                (date(2024, Month::March, 17), 2),
            ]
        );
    }

    #[test]
    fn test_prelight_days_are_not_shifted_off_sunday() {
        // Prelight before Monday March 11 includes Sunday the 10th
        let range = ReferenceRange::single_day(date(2024, Month::March, 11));

        let days = derive_phase_days(LinkPhase::Prelight, &range, 2);

        assert_eq!(
            days,
            vec![
                (date(2024, Month::March, 9), -2),
                (date(2024, Month::March, 10), -1),
            ]
        );
    }
}
