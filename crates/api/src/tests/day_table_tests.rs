// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Day-table CSV preview and import tests.

use crate::day_table_csv::{CsvRowStatus, import_day_table_csv, preview_day_table_csv};
use crate::error::ApiError;
use crate::handlers::preview_round_trip;
use crate::request_response::RoundTripPreviewRequest;

use super::helpers::{
    PRODUCTION, create_production_actor, location_reference, setup_test_persistence,
};

const VALID_CSV: &str = "\
date,location,linked_location
2024-03-20,loc-river,
2024-03-21,loc-river,loc-bridge
";

#[test]
fn test_preview_counts_valid_rows() {
    let preview = preview_day_table_csv(VALID_CSV).expect("Preview should succeed");

    assert_eq!(preview.total_rows, 2);
    assert_eq!(preview.valid_count, 2);
    assert_eq!(preview.invalid_count, 0);
}

#[test]
fn test_preview_flags_bad_dates_per_row() {
    let csv = "date,location\nnot-a-date,loc-river\n2024-03-21,loc-river\n";

    let preview = preview_day_table_csv(csv).expect("Preview should still succeed");

    assert_eq!(preview.valid_count, 1);
    assert_eq!(preview.invalid_count, 1);
    assert_eq!(preview.rows[0].status, CsvRowStatus::Invalid);
    assert!(!preview.rows[0].errors.is_empty());
}

#[test]
fn test_preview_rejects_missing_headers() {
    let result = preview_day_table_csv("when,where\n2024-03-20,loc-river\n");

    assert!(matches!(result, Err(ApiError::InvalidCsvFormat { .. })));
}

#[test]
fn test_import_upserts_valid_rows_and_skips_invalid_ones() {
    let mut persistence = setup_test_persistence();
    let csv = "date,location\n2024-03-20,loc-river\nbad-date,loc-river\n2024-03-21,loc-river\n";

    let result = import_day_table_csv(
        &mut persistence,
        PRODUCTION,
        csv,
        &create_production_actor(),
    )
    .expect("Import should succeed");

    assert_eq!(result.imported_count, 2);
    assert_eq!(result.skipped_count, 1);

    // The imported days are immediately usable as a location reference
    let preview = preview_round_trip(
        &mut persistence,
        &RoundTripPreviewRequest {
            production: String::from(PRODUCTION),
            reference: location_reference("loc-river"),
            full_duration: false,
        },
    )
    .expect("Location should resolve");
    assert_eq!(preview.usage_date, "2024-03-20");
}
