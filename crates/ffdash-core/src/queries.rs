//! League aggregates
//!
//! Every aggregate counts regular-season games only. Filters are always
//! bound as parameters using the `(?N IS NULL OR column = ?N)` form, so
//! "all" is simply a NULL binding.
//!
//! Point totals and averages are rounded to 2 decimals, win percentage
//! (wins / games) to 3.

use rusqlite::Row;

use crate::error::StoreResult;
use crate::models::{
    CoachFilter, CoachLookupEntry, HeadToHeadRow, StandingRow, WeeklyPerformanceRow, YearFilter,
    YearlySummaryRow,
};
use crate::store::Store;

/// Season type included in every aggregate
pub const REGULAR_SEASON: &str = "Regular";

const STANDINGS: &str = "
    SELECT
        coach,
        COUNT(*) AS games,
        SUM(CASE WHEN result = 'W' THEN 1 ELSE 0 END) AS wins,
        SUM(CASE WHEN result = 'L' THEN 1 ELSE 0 END) AS losses,
        SUM(CASE WHEN result = 'T' THEN 1 ELSE 0 END) AS ties,
        ROUND(SUM(points), 2) AS points_for,
        ROUND(SUM(opp_points), 2) AS points_against,
        ROUND(AVG(points), 2) AS avg_points_for,
        ROUND(AVG(opp_points), 2) AS avg_points_against,
        ROUND(CAST(SUM(CASE WHEN result = 'W' THEN 1 ELSE 0 END) AS REAL) / COUNT(*), 3) AS win_pct
    FROM weekly_results
    WHERE season_type = ?1
      AND (?2 IS NULL OR year = ?2)
    GROUP BY coach
    ORDER BY win_pct DESC, points_for DESC";

const HEAD_TO_HEAD: &str = "
    SELECT
        coach,
        opp_coach,
        COUNT(*) AS games,
        SUM(CASE WHEN result = 'W' THEN 1 ELSE 0 END) AS wins,
        SUM(CASE WHEN result = 'L' THEN 1 ELSE 0 END) AS losses,
        SUM(CASE WHEN result = 'T' THEN 1 ELSE 0 END) AS ties,
        ROUND(SUM(points), 2) AS points_for,
        ROUND(SUM(opp_points), 2) AS points_against,
        ROUND(CAST(SUM(CASE WHEN result = 'W' THEN 1 ELSE 0 END) AS REAL) / COUNT(*), 3) AS win_pct
    FROM weekly_results
    WHERE season_type = ?1
    GROUP BY coach, opp_coach
    ORDER BY coach, win_pct DESC";

const WEEKLY_PERFORMANCE: &str = "
    SELECT year, week, points, opp_points, result, opponent, opp_coach
    FROM weekly_results
    WHERE season_type = ?1
      AND (?2 IS NULL OR coach = ?2)
      AND (?3 IS NULL OR year = ?3)
    ORDER BY year, week";

const YEARLY_SUMMARY: &str = "
    SELECT
        year,
        coach,
        COUNT(*) AS games,
        SUM(CASE WHEN result = 'W' THEN 1 ELSE 0 END) AS wins,
        SUM(CASE WHEN result = 'L' THEN 1 ELSE 0 END) AS losses,
        SUM(CASE WHEN result = 'T' THEN 1 ELSE 0 END) AS ties,
        ROUND(SUM(points), 2) AS points_for,
        ROUND(SUM(opp_points), 2) AS points_against,
        ROUND(AVG(points), 2) AS avg_points,
        ROUND(CAST(SUM(CASE WHEN result = 'W' THEN 1 ELSE 0 END) AS REAL) / COUNT(*), 3) AS win_pct
    FROM weekly_results
    WHERE season_type = ?1
    GROUP BY year, coach
    ORDER BY year, win_pct DESC";

const COACHES: &str = "
    SELECT DISTINCT coach FROM weekly_results
    WHERE coach IS NOT NULL
    ORDER BY coach";

const YEARS: &str = "
    SELECT DISTINCT year FROM weekly_results
    WHERE typeof(year) = 'integer'
    ORDER BY year";

const COACH_LOOKUP: &str = "
    SELECT roster_name, canonical_coach FROM coach_lookup
    ORDER BY roster_name";

const CANONICAL_COACH: &str = "
    SELECT canonical_coach FROM coach_lookup
    WHERE roster_name = ?1 AND canonical_coach IS NOT NULL
    LIMIT 1";

impl Store {
    /// Per-coach record, best win percentage first
    pub fn standings(&self, year: &YearFilter) -> StoreResult<Vec<StandingRow>> {
        let conn = self.conn();
        let mut stmt = conn.prepare_cached(STANDINGS)?;
        let rows = stmt
            .query_map((REGULAR_SEASON, year.as_param()), standing_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Per-(coach, opponent coach) record
    pub fn head_to_head(&self) -> StoreResult<Vec<HeadToHeadRow>> {
        let conn = self.conn();
        let mut stmt = conn.prepare_cached(HEAD_TO_HEAD)?;
        let rows = stmt
            .query_map([REGULAR_SEASON], head_to_head_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Individual games, ordered by season then week
    pub fn weekly_performance(
        &self,
        coach: &CoachFilter,
        year: &YearFilter,
    ) -> StoreResult<Vec<WeeklyPerformanceRow>> {
        let conn = self.conn();
        let mut stmt = conn.prepare_cached(WEEKLY_PERFORMANCE)?;
        let rows = stmt
            .query_map(
                (REGULAR_SEASON, coach.as_param(), year.as_param()),
                weekly_performance_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Per-(season, coach) record
    pub fn yearly_summary(&self) -> StoreResult<Vec<YearlySummaryRow>> {
        let conn = self.conn();
        let mut stmt = conn.prepare_cached(YEARLY_SUMMARY)?;
        let rows = stmt
            .query_map([REGULAR_SEASON], yearly_summary_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Distinct coach names, ascending
    pub fn coaches(&self) -> StoreResult<Vec<String>> {
        let conn = self.conn();
        let mut stmt = conn.prepare_cached(COACHES)?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(rows)
    }

    /// Distinct seasons, ascending
    pub fn years(&self) -> StoreResult<Vec<i64>> {
        let conn = self.conn();
        let mut stmt = conn.prepare_cached(YEARS)?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;
        Ok(rows)
    }

    /// Stored roster-name mappings
    ///
    /// The mapping is not applied to any aggregate.
    pub fn coach_lookup(&self) -> StoreResult<Vec<CoachLookupEntry>> {
        let conn = self.conn();
        let mut stmt = conn.prepare_cached(COACH_LOOKUP)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(CoachLookupEntry {
                    roster_name: row.get(0)?,
                    canonical_coach: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Canonical coach for a roster name, if a mapping exists
    pub fn canonical_coach(&self, roster_name: &str) -> StoreResult<Option<String>> {
        let conn = self.conn();
        let mut stmt = conn.prepare_cached(CANONICAL_COACH)?;
        let mut rows = stmt.query_map([roster_name], |row| row.get(0))?;
        Ok(rows.next().transpose()?)
    }
}

fn standing_row(row: &Row<'_>) -> rusqlite::Result<StandingRow> {
    Ok(StandingRow {
        coach: row.get("coach")?,
        games: row.get("games")?,
        wins: row.get("wins")?,
        losses: row.get("losses")?,
        ties: row.get("ties")?,
        points_for: row.get("points_for")?,
        points_against: row.get("points_against")?,
        avg_points_for: row.get("avg_points_for")?,
        avg_points_against: row.get("avg_points_against")?,
        win_pct: row.get("win_pct")?,
    })
}

fn head_to_head_row(row: &Row<'_>) -> rusqlite::Result<HeadToHeadRow> {
    Ok(HeadToHeadRow {
        coach: row.get("coach")?,
        opp_coach: row.get("opp_coach")?,
        games: row.get("games")?,
        wins: row.get("wins")?,
        losses: row.get("losses")?,
        ties: row.get("ties")?,
        points_for: row.get("points_for")?,
        points_against: row.get("points_against")?,
        win_pct: row.get("win_pct")?,
    })
}

fn weekly_performance_row(row: &Row<'_>) -> rusqlite::Result<WeeklyPerformanceRow> {
    Ok(WeeklyPerformanceRow {
        year: row.get("year")?,
        week: row.get("week")?,
        points: row.get("points")?,
        opp_points: row.get("opp_points")?,
        result: row.get("result")?,
        opponent: row.get("opponent")?,
        opp_coach: row.get("opp_coach")?,
    })
}

fn yearly_summary_row(row: &Row<'_>) -> rusqlite::Result<YearlySummaryRow> {
    Ok(YearlySummaryRow {
        year: row.get("year")?,
        coach: row.get("coach")?,
        games: row.get("games")?,
        wins: row.get("wins")?,
        losses: row.get("losses")?,
        ties: row.get("ties")?,
        points_for: row.get("points_for")?,
        points_against: row.get("points_against")?,
        avg_points: row.get("avg_points")?,
        win_pct: row.get("win_pct")?,
    })
}
