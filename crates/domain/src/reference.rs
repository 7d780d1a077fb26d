// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference-range resolution for linked schedule entries.
//!
//! A linked entry anchors to either a shooting sequence (always a single
//! day) or a shooting location (possibly spanning several production days).
//! This module resolves that reference into a concrete first/last date
//! range against the read-only day and sequence tables.

use crate::types::{LinkRef, ProductionDay, Sequence};
use time::Date;

/// The first/last date spanned by a linked sequence or location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceRange {
    /// The first day of the range.
    pub first_date: Date,
    /// The last day of the range (equal to `first_date` for a single day).
    pub last_date: Date,
}

impl ReferenceRange {
    /// Creates a single-day range.
    #[must_use]
    pub const fn single_day(date: Date) -> Self {
        Self {
            first_date: date,
            last_date: date,
        }
    }

    /// Returns whether the range spans more than one date.
    ///
    /// Multi-day locations offer a "full duration" versus "first day only"
    /// choice for transport derivation.
    #[must_use]
    pub fn is_multi_day(&self) -> bool {
        self.first_date != self.last_date
    }
}

/// Resolves a reference into its date range.
///
/// # Arguments
///
/// * `reference` - The linked sequence or location
/// * `production_days` - The read-only production day table
/// * `sequences` - The read-only sequence table
///
/// # Returns
///
/// * `Some(range)` - The resolved first/last date range
/// * `None` - The sequence is unknown or no production day shoots at the
///   location. Callers fall back to an unlinked, manually-dated entry;
///   submission without a usable date is blocked upstream.
#[must_use]
pub fn resolve_reference(
    reference: &LinkRef,
    production_days: &[ProductionDay],
    sequences: &[Sequence],
) -> Option<ReferenceRange> {
    match reference {
        LinkRef::Sequence(sequence_id) => sequences
            .iter()
            .find(|s| s.sequence_id == *sequence_id)
            .map(|s| ReferenceRange::single_day(s.date)),
        LinkRef::Location(location_id) => resolve_location_range(location_id, production_days),
    }
}

/// Resolves the date range a location is shot over.
///
/// Scans every production day whose location or linked location matches and
/// takes the earliest and latest date.
fn resolve_location_range(
    location_id: &str,
    production_days: &[ProductionDay],
) -> Option<ReferenceRange> {
    let mut dates: Vec<Date> = production_days
        .iter()
        .filter(|day| day.matches_location(location_id))
        .map(|day| day.date)
        .collect();

    dates.sort_unstable();

    let first_date = *dates.first()?;
    let last_date = *dates.last()?;

    Some(ReferenceRange {
        first_date,
        last_date,
    })
}
