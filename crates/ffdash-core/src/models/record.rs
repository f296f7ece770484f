//! Canonical ingestion records
//!
//! Records carry cells exactly as read from the workbook. A field the sheet
//! did not provide is `None` and lands in the store as NULL.

use serde::Serialize;

use super::cell::CellValue;

/// One team's side of one matchup in one week of one season
///
/// The opponent's perspective is a separate record sharing the same `pair`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeeklyResult {
    pub year: Option<CellValue>,
    pub week: Option<CellValue>,
    pub team: Option<CellValue>,
    pub opponent: Option<CellValue>,
    pub points: Option<CellValue>,
    pub opp_points: Option<CellValue>,
    /// `W`, `L` or `T`
    pub result: Option<CellValue>,
    /// e.g. "Regular"; only regular-season rows feed the aggregates
    pub season_type: Option<CellValue>,
    pub coach: Option<CellValue>,
    pub opp_coach: Option<CellValue>,
    /// Stable matchup identifier shared with the mirror row
    pub pair: Option<CellValue>,
}

/// Maps a roster display name to the canonical coach identity
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoachLookup {
    pub roster_name: Option<CellValue>,
    pub canonical_coach: Option<CellValue>,
}

/// Everything one workbook contributes to the store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub weekly_results: Vec<WeeklyResult>,
    pub coach_lookup: Vec<CoachLookup>,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.weekly_results.is_empty() && self.coach_lookup.is_empty()
    }
}
