//! In-memory SQLite store
//!
//! Two tables with no constraints: `weekly_results` and `coach_lookup`.
//! Contents are only ever replaced wholesale, each replacement inside one
//! transaction so readers never see a half-loaded table.

use parking_lot::{Mutex, MutexGuard};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, ToSql, Transaction};

use crate::error::StoreResult;
use crate::models::{CellValue, CoachLookup, Dataset, WeeklyResult};

const CREATE_WEEKLY_RESULTS: &str = "
    CREATE TABLE IF NOT EXISTS weekly_results (
        year        INTEGER,
        week        INTEGER,
        team        TEXT,
        opponent    TEXT,
        points      REAL,
        opp_points  REAL,
        result      TEXT,
        season_type TEXT,
        coach       TEXT,
        opp_coach   TEXT,
        pair        TEXT
    );";

const CREATE_COACH_LOOKUP: &str = "
    CREATE TABLE IF NOT EXISTS coach_lookup (
        roster_name     TEXT,
        canonical_coach TEXT
    );";

const INSERT_WEEKLY_RESULT: &str = "
    INSERT INTO weekly_results
        (year, week, team, opponent, points, opp_points, result, season_type, coach, opp_coach, pair)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);";

const INSERT_COACH_LOOKUP: &str = "
    INSERT INTO coach_lookup (roster_name, canonical_coach)
    VALUES (?1, ?2);";

impl ToSql for CellValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            CellValue::Int(v) => ToSqlOutput::from(*v),
            CellValue::Float(v) => ToSqlOutput::from(*v),
            CellValue::Text(v) => ToSqlOutput::from(v.as_str()),
            CellValue::Bool(v) => ToSqlOutput::from(*v),
        })
    }
}

/// Stored values read back with the type SQLite kept them as
impl FromSql for CellValue {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Integer(v) => Ok(CellValue::Int(v)),
            ValueRef::Real(v) => Ok(CellValue::Float(v)),
            ValueRef::Text(_) => value.as_str().map(|s| CellValue::Text(s.to_string())),
            ValueRef::Null | ValueRef::Blob(_) => Err(FromSqlError::InvalidType),
        }
    }
}

/// Thread-safe handle to the league database
///
/// One connection shared by every request; access is serialized by the
/// mutex, so a replacement and a concurrent read never interleave.
#[derive(Debug)]
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Open a fresh in-memory database and create the tables
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    /// Wrap an existing connection, creating the tables if needed
    pub fn with_connection(mut conn: Connection) -> StoreResult<Self> {
        create_schema(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock()
    }

    /// Delete every weekly result and insert `records` in their place
    pub fn replace_weekly_results(&self, records: &[WeeklyResult]) -> StoreResult<usize> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let count = write_weekly_results(&tx, records)?;
        tx.commit()?;
        Ok(count)
    }

    /// Delete every coach mapping and insert `records` in their place
    pub fn replace_coach_lookup(&self, records: &[CoachLookup]) -> StoreResult<usize> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let count = write_coach_lookup(&tx, records)?;
        tx.commit()?;
        Ok(count)
    }

    /// Replace both tables in a single transaction
    pub fn replace_all(&self, dataset: &Dataset) -> StoreResult<(usize, usize)> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let weekly = write_weekly_results(&tx, &dataset.weekly_results)?;
        let lookup = write_coach_lookup(&tx, &dataset.coach_lookup)?;
        tx.commit()?;
        Ok((weekly, lookup))
    }

    pub fn weekly_result_count(&self) -> StoreResult<usize> {
        count_rows(&self.conn(), "weekly_results")
    }

    pub fn coach_lookup_count(&self) -> StoreResult<usize> {
        count_rows(&self.conn(), "coach_lookup")
    }
}

fn create_schema(conn: &mut Connection) -> StoreResult<()> {
    let tx = conn.transaction()?;
    tx.execute(CREATE_WEEKLY_RESULTS, [])?;
    tx.execute(CREATE_COACH_LOOKUP, [])?;
    tx.commit()?;
    Ok(())
}

fn write_weekly_results(tx: &Transaction<'_>, records: &[WeeklyResult]) -> StoreResult<usize> {
    tx.execute("DELETE FROM weekly_results", [])?;

    let mut stmt = tx.prepare(INSERT_WEEKLY_RESULT)?;
    for r in records {
        stmt.execute(params![
            r.year,
            r.week,
            r.team,
            r.opponent,
            r.points,
            r.opp_points,
            r.result,
            r.season_type,
            r.coach,
            r.opp_coach,
            r.pair,
        ])?;
    }

    Ok(records.len())
}

fn write_coach_lookup(tx: &Transaction<'_>, records: &[CoachLookup]) -> StoreResult<usize> {
    tx.execute("DELETE FROM coach_lookup", [])?;

    let mut stmt = tx.prepare(INSERT_COACH_LOOKUP)?;
    for r in records {
        stmt.execute(params![r.roster_name, r.canonical_coach])?;
    }

    Ok(records.len())
}

fn count_rows(conn: &Connection, table: &'static str) -> StoreResult<usize> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })?;
    Ok(count as usize)
}
