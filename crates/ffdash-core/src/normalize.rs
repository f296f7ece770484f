//! Header normalization for workbook rows
//!
//! Source sheets are not consistent about header casing (`Year` in one
//! export, `year` in another). Each canonical field lists the header
//! spellings it accepts, in priority order; the first spelling present in a
//! row wins. Values are passed through untouched.

use crate::models::{CellValue, CoachLookup, RawRow, WeeklyResult};

/// Accepted header spellings for one canonical field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    /// Canonical field (and store column) name
    pub field: &'static str,
    /// Header spellings, highest priority first
    pub headers: &'static [&'static str],
}

const fn column(field: &'static str, headers: &'static [&'static str]) -> ColumnMap {
    ColumnMap { field, headers }
}

/// Columns of the `weekly_results` sheet
pub const WEEKLY_RESULT_COLUMNS: &[ColumnMap] = &[
    column("year", &["Year", "year"]),
    column("week", &["Week", "week"]),
    column("team", &["Team", "team"]),
    column("opponent", &["Opponent", "opponent"]),
    column("points", &["Points", "points"]),
    column("opp_points", &["Opp_Points", "opp_points"]),
    column("result", &["Result", "result"]),
    column("season_type", &["Season_Type", "season_type"]),
    column("coach", &["Coach", "coach"]),
    column("opp_coach", &["Opp_Coach", "opp_coach"]),
    column("pair", &["Pair", "pair"]),
];

/// Columns of the `coach_lookup` sheet
pub const COACH_LOOKUP_COLUMNS: &[ColumnMap] = &[
    column("roster_name", &["Roster_Name", "roster_name"]),
    column("canonical_coach", &["Canonical_Coach", "canonical_coach"]),
];

impl ColumnMap {
    /// First non-blank value among the accepted spellings
    pub fn resolve(&self, row: &RawRow) -> Option<CellValue> {
        self.headers
            .iter()
            .filter_map(|header| row.get(header))
            .find(|value| !value.is_blank())
            .cloned()
    }
}

/// Field lookup over one row against one mapping table
struct Columns<'a> {
    row: &'a RawRow,
    map: &'static [ColumnMap],
}

impl<'a> Columns<'a> {
    fn new(row: &'a RawRow, map: &'static [ColumnMap]) -> Self {
        Self { row, map }
    }

    fn field(&self, name: &str) -> Option<CellValue> {
        self.map
            .iter()
            .find(|c| c.field == name)
            .and_then(|c| c.resolve(self.row))
    }
}

/// Map a `weekly_results` row onto the canonical record
pub fn normalize_weekly_result(row: &RawRow) -> WeeklyResult {
    let cols = Columns::new(row, WEEKLY_RESULT_COLUMNS);
    WeeklyResult {
        year: cols.field("year"),
        week: cols.field("week"),
        team: cols.field("team"),
        opponent: cols.field("opponent"),
        points: cols.field("points"),
        opp_points: cols.field("opp_points"),
        result: cols.field("result"),
        season_type: cols.field("season_type"),
        coach: cols.field("coach"),
        opp_coach: cols.field("opp_coach"),
        pair: cols.field("pair"),
    }
}

/// Map a `coach_lookup` row onto the canonical record
pub fn normalize_coach_lookup(row: &RawRow) -> CoachLookup {
    let cols = Columns::new(row, COACH_LOOKUP_COLUMNS);
    CoachLookup {
        roster_name: cols.field("roster_name"),
        canonical_coach: cols.field("canonical_coach"),
    }
}
