// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{LogisticsRequest, RequestKind};
use time::macros::format_description;
use time::{Date, Weekday};

/// Validates a production name.
///
/// # Errors
///
/// Returns an error if the name is empty or whitespace-only.
pub fn validate_production_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidProductionName(String::from(
            "Production name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates a department name.
///
/// # Errors
///
/// Returns an error if the name is empty or whitespace-only.
pub fn validate_department_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidDepartment(String::from(
            "Department name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates a reinforcement staff name.
///
/// # Errors
///
/// Returns an error if the name is empty or whitespace-only.
pub fn validate_staff_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Staff name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates a link duration.
///
/// # Errors
///
/// Returns an error if the duration is zero.
pub const fn validate_duration(duration: u32) -> Result<(), DomainError> {
    if duration == 0 {
        return Err(DomainError::InvalidDuration { given: duration });
    }
    Ok(())
}

/// Parses an ISO day string (`YYYY-MM-DD`) into a date.
///
/// # Errors
///
/// Returns an error if the string is not a valid calendar date.
pub fn parse_date(date_string: &str) -> Result<Date, DomainError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(date_string, &format).map_err(|e| DomainError::DateParseError {
        date_string: date_string.to_string(),
        error: e.to_string(),
    })
}

/// Formats a date as an ISO day string (`YYYY-MM-DD`).
#[must_use]
pub fn format_date(date: Date) -> String {
    let format = format_description!("[year]-[month]-[day]");
    date.format(&format)
        .unwrap_or_else(|_| date.to_string())
}

/// Validates the legs of a round-trip group before insertion.
///
/// # Arguments
///
/// * `legs` - The legs of the group, in creation order
///
/// # Errors
///
/// Returns an error if:
/// - The group does not contain 2 or 3 legs
/// - More than one leg is a usage leg
/// - The legs do not all share one group id
/// - A pickup or dropoff leg is dated on a Sunday
pub fn validate_round_trip_group(legs: &[LogisticsRequest]) -> Result<(), DomainError> {
    if !(2..=3).contains(&legs.len()) {
        return Err(DomainError::InvalidGroupSize { count: legs.len() });
    }

    let usage_count = legs
        .iter()
        .filter(|leg| leg.kind == RequestKind::Usage)
        .count();
    if usage_count > 1 {
        return Err(DomainError::MultipleUsageLegs { count: usage_count });
    }

    let first_group = legs.first().and_then(|leg| leg.group_id.as_ref());
    if first_group.is_none() || legs.iter().any(|leg| leg.group_id.as_ref() != first_group) {
        return Err(DomainError::MixedGroupIds);
    }

    for leg in legs {
        validate_transport_leg_date(leg.kind, leg.date)?;
    }

    Ok(())
}

/// Validates that a pickup or dropoff leg is not dated on a Sunday.
///
/// Usage and round-trip legs pass through: shooting happens on Sundays,
/// only supplier-facing legs are restricted.
///
/// # Errors
///
/// Returns an error if a pickup-like or dropoff-like leg falls on Sunday.
pub fn validate_transport_leg_date(kind: RequestKind, date: Date) -> Result<(), DomainError> {
    let restricted = kind.is_pickup_like() || kind.is_dropoff_like();
    if restricted && date.weekday() == Weekday::Sunday {
        return Err(DomainError::SundayNotAllowed { date });
    }
    Ok(())
}
