// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Server-side identifier generation.
//!
//! Round-trip groups and staff entries carry application-generated ids:
//! group ids tie siblings together explicitly, staff ids stay stable while
//! an entry moves between dates.

use callsheet_domain::GroupId;
use rand::RngExt;

/// Generates a fresh group id for a round-trip.
#[must_use]
pub fn generate_group_id() -> GroupId {
    let value: u64 = rand::rng().random();
    let raw = format!("grp-{value:016x}");
    match GroupId::new(&raw) {
        Ok(group) => group,
        // The formatted value is never empty
        Err(_) => unreachable!("Generated group id failed validation"),
    }
}

/// Generates a fresh staff entry id.
#[must_use]
pub fn generate_staff_id() -> String {
    let value: u64 = rand::rng().random();
    format!("staff-{value:016x}")
}
