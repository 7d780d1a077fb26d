// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV preview and import for the production day table.
//!
//! Assistant directors maintain the shooting schedule in spreadsheets;
//! this module validates an exported CSV row by row and upserts the valid
//! rows into the day table. Preview never mutates state.

use csv::StringRecord;
use std::collections::HashMap;
use thiserror::Error;

use callsheet_domain::{ProductionDay, parse_date};
use callsheet_persistence::Persistence;

use crate::auth::{AuthenticatedActor, require_production};
use crate::error::{ApiError, translate_persistence_error};

/// Required CSV column headers (case-insensitive, normalized).
const REQUIRED_HEADERS: &[&str] = &["date", "location"];

/// Optional CSV column headers.
const LINKED_LOCATION_HEADER: &str = "linked_location";

/// Errors specific to day-table CSV handling.
#[derive(Debug, Error)]
pub enum DayTableCsvError {
    /// The CSV is missing required headers.
    #[error("Missing required headers: {0}")]
    MissingHeaders(String),
    /// The CSV could not be read.
    #[error("CSV read error: {0}")]
    Read(#[from] csv::Error),
}

impl From<DayTableCsvError> for ApiError {
    fn from(error: DayTableCsvError) -> Self {
        Self::InvalidCsvFormat {
            reason: error.to_string(),
        }
    }
}

/// Status of a CSV row validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvRowStatus {
    /// Row is valid and can be imported.
    Valid,
    /// Row has validation errors and cannot be imported.
    Invalid,
}

/// A single row result from CSV preview validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRowResult {
    /// The row number (1-based, excluding header).
    pub row_number: usize,
    /// The parsed date (if valid).
    pub date: Option<String>,
    /// The parsed location (if any).
    pub location: Option<String>,
    /// The parsed linked location (if any).
    pub linked_location: Option<String>,
    /// The row status.
    pub status: CsvRowStatus,
    /// Zero or more validation errors.
    pub errors: Vec<String>,
}

/// Result of CSV preview validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvPreviewResult {
    /// Per-row validation results.
    pub rows: Vec<CsvRowResult>,
    /// Total number of rows.
    pub total_rows: usize,
    /// Number of valid rows.
    pub valid_count: usize,
    /// Number of invalid rows.
    pub invalid_count: usize,
}

/// Result of a CSV import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvImportResult {
    /// Number of rows upserted into the day table.
    pub imported_count: usize,
    /// Number of rows skipped for validation errors.
    pub skipped_count: usize,
    /// The per-row preview the import was based on.
    pub rows: Vec<CsvRowResult>,
}

/// Normalizes a CSV header string for case-insensitive, whitespace-tolerant
/// matching.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Validates that all required headers are present in the CSV.
fn validate_headers(headers: &StringRecord) -> Result<HashMap<String, usize>, DayTableCsvError> {
    let mut header_map: HashMap<String, usize> = HashMap::new();

    for (idx, header) in headers.iter().enumerate() {
        header_map.insert(normalize_header(header), idx);
    }

    let missing: Vec<String> = REQUIRED_HEADERS
        .iter()
        .filter(|required| !header_map.contains_key(**required))
        .map(|required| String::from(*required))
        .collect();

    if missing.is_empty() {
        Ok(header_map)
    } else {
        Err(DayTableCsvError::MissingHeaders(missing.join(", ")))
    }
}

/// Reads a cell as a trimmed non-empty string.
fn cell(record: &StringRecord, index: Option<&usize>) -> Option<String> {
    index
        .and_then(|idx| record.get(*idx))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

/// Validates one CSV row.
fn validate_row(
    row_number: usize,
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> CsvRowResult {
    let mut errors: Vec<String> = Vec::new();

    let raw_date = cell(record, header_map.get("date"));
    let date = match &raw_date {
        Some(raw) => match parse_date(raw) {
            Ok(_) => raw_date.clone(),
            Err(e) => {
                errors.push(e.to_string());
                None
            }
        },
        None => {
            errors.push(String::from("Missing date"));
            None
        }
    };

    let location = cell(record, header_map.get("location"));
    let linked_location = cell(record, header_map.get(LINKED_LOCATION_HEADER));

    let status = if errors.is_empty() {
        CsvRowStatus::Valid
    } else {
        CsvRowStatus::Invalid
    };

    CsvRowResult {
        row_number,
        date,
        location,
        linked_location,
        status,
        errors,
    }
}

/// Parses and validates a day-table CSV without mutating state.
///
/// # Arguments
///
/// * `csv_content` - The raw CSV content, header row included
///
/// # Errors
///
/// Returns an error if the CSV cannot be parsed or required headers are
/// missing. Per-row validation problems are reported in the result, not
/// as errors.
pub fn preview_day_table_csv(csv_content: &str) -> Result<CsvPreviewResult, ApiError> {
    let mut reader = csv::Reader::from_reader(csv_content.as_bytes());

    let headers = reader
        .headers()
        .map_err(DayTableCsvError::from)?
        .clone();
    let header_map = validate_headers(&headers)?;

    let mut rows: Vec<CsvRowResult> = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(DayTableCsvError::from)?;
        rows.push(validate_row(index + 1, &record, &header_map));
    }

    let valid_count = rows
        .iter()
        .filter(|row| row.status == CsvRowStatus::Valid)
        .count();
    let invalid_count = rows.len() - valid_count;

    Ok(CsvPreviewResult {
        total_rows: rows.len(),
        valid_count,
        invalid_count,
        rows,
    })
}

/// Imports the valid rows of a day-table CSV into a production's day
/// table. Invalid rows are skipped and reported.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `production` - The production name
/// * `csv_content` - The raw CSV content, header row included
/// * `actor` - The authenticated actor (production authority required)
///
/// # Errors
///
/// Returns an error if the actor lacks production authority, the CSV is
/// malformed, the production does not exist, or a write fails.
pub fn import_day_table_csv(
    persistence: &mut Persistence,
    production: &str,
    csv_content: &str,
    actor: &AuthenticatedActor,
) -> Result<CsvImportResult, ApiError> {
    require_production(actor, "import_day_table_csv")?;

    let preview = preview_day_table_csv(csv_content)?;
    let production_id = persistence
        .get_production_id(production)
        .map_err(translate_persistence_error)?;

    let mut imported_count = 0;
    for row in &preview.rows {
        if row.status != CsvRowStatus::Valid {
            continue;
        }
        let Some(raw_date) = &row.date else { continue };
        let date = parse_date(raw_date).map_err(|e| ApiError::Internal {
            message: format!("Previewed date failed to re-parse: {e}"),
        })?;

        persistence
            .upsert_production_day(
                production_id,
                &ProductionDay {
                    date,
                    location: row.location.clone(),
                    linked_location: row.linked_location.clone(),
                },
            )
            .map_err(translate_persistence_error)?;
        imported_count += 1;
    }

    Ok(CsvImportResult {
        imported_count,
        skipped_count: preview.invalid_count,
        rows: preview.rows,
    })
}
