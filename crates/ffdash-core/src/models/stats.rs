//! Aggregate and listing rows returned by the store
//!
//! Field names are the JSON keys served by the API. Columns that may hold
//! NULL in the store are `Option`s. Stored cells served as-is are
//! `CellValue`s, since a sheet may put text where a number is expected.

use serde::Serialize;

use super::cell::CellValue;

/// Regular-season record of one coach
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingRow {
    pub coach: Option<String>,
    pub games: i64,
    pub wins: i64,
    pub losses: i64,
    pub ties: i64,
    pub points_for: Option<f64>,
    pub points_against: Option<f64>,
    pub avg_points_for: Option<f64>,
    pub avg_points_against: Option<f64>,
    /// wins / games, rounded to 3 decimals
    pub win_pct: f64,
}

/// Regular-season record of one coach against one opponent coach
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadToHeadRow {
    pub coach: Option<String>,
    pub opp_coach: Option<String>,
    pub games: i64,
    pub wins: i64,
    pub losses: i64,
    pub ties: i64,
    pub points_for: Option<f64>,
    pub points_against: Option<f64>,
    pub win_pct: f64,
}

/// A single regular-season game from one coach's side
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyPerformanceRow {
    pub year: Option<CellValue>,
    pub week: Option<CellValue>,
    pub points: Option<CellValue>,
    pub opp_points: Option<CellValue>,
    pub result: Option<String>,
    pub opponent: Option<String>,
    pub opp_coach: Option<String>,
}

/// Regular-season record of one coach in one season
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlySummaryRow {
    pub year: Option<CellValue>,
    pub coach: Option<String>,
    pub games: i64,
    pub wins: i64,
    pub losses: i64,
    pub ties: i64,
    pub points_for: Option<f64>,
    pub points_against: Option<f64>,
    pub avg_points: Option<f64>,
    pub win_pct: f64,
}

/// Stored roster-name mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoachLookupEntry {
    pub roster_name: Option<String>,
    pub canonical_coach: Option<String>,
}
