//! Ingestion pipeline: workbook → normalized records → store replacement
//!
//! A workbook may carry either recognized sheet or both. A missing sheet
//! contributes no rows, so its table ends up empty after the replacement.

use std::path::Path;

use serde::Serialize;

use crate::error::IngestResult;
use crate::models::Dataset;
use crate::normalize::{normalize_coach_lookup, normalize_weekly_result};
use crate::store::Store;
use crate::workbook::Workbook;

/// Sheet holding one row per team per game
pub const WEEKLY_RESULTS_SHEET: &str = "weekly_results";

/// Sheet holding roster-name → coach mappings
pub const COACH_LOOKUP_SHEET: &str = "coach_lookup";

/// Row counts written by one ingestion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub weekly_results: usize,
    pub coach_lookup: usize,
}

/// Read and normalize both recognized sheets of a workbook
pub fn load_dataset(path: impl AsRef<Path>) -> IngestResult<Dataset> {
    let mut workbook = Workbook::open(path)?;

    let weekly_results = match workbook.sheet_rows(WEEKLY_RESULTS_SHEET)? {
        Some(rows) => {
            tracing::info!(rows = rows.len(), "Processing weekly results");
            rows.iter().map(normalize_weekly_result).collect()
        }
        None => {
            tracing::debug!(sheet = WEEKLY_RESULTS_SHEET, "Sheet not present");
            Vec::new()
        }
    };

    let coach_lookup = match workbook.sheet_rows(COACH_LOOKUP_SHEET)? {
        Some(rows) => {
            tracing::info!(rows = rows.len(), "Processing coach mappings");
            rows.iter().map(normalize_coach_lookup).collect()
        }
        None => {
            tracing::debug!(sheet = COACH_LOOKUP_SHEET, "Sheet not present");
            Vec::new()
        }
    };

    Ok(Dataset {
        weekly_results,
        coach_lookup,
    })
}

/// Load a workbook and replace the store contents with it
///
/// Both tables are replaced in one transaction; on any error the store keeps
/// its previous contents.
pub fn ingest_file(store: &Store, path: impl AsRef<Path>) -> IngestResult<IngestSummary> {
    let path = path.as_ref();
    let dataset = load_dataset(path)?;
    let (weekly_results, coach_lookup) = store.replace_all(&dataset)?;

    tracing::info!(
        path = %path.display(),
        weekly_results,
        coach_lookup,
        "Workbook ingested"
    );

    Ok(IngestSummary {
        weekly_results,
        coach_lookup,
    })
}

/// Seed the store at startup
///
/// Failure is not fatal: it is logged and the store stays as it was.
pub fn seed_from_file(store: &Store, path: impl AsRef<Path>) -> Option<IngestSummary> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "Loading initial data");

    match ingest_file(store, path) {
        Ok(summary) => Some(summary),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "No initial data file found or error loading, continuing with empty data"
            );
            None
        }
    }
}
