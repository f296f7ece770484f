//! League aggregate handlers
//!
//! All handlers return bare JSON arrays.

use axum::extract::{Query, State};
use axum::Json;
use ffdash_core::{
    CoachFilter, CoachLookupEntry, HeadToHeadRow, StandingRow, WeeklyPerformanceRow, YearFilter,
    YearlySummaryRow,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Query Parameters
// =============================================================================

#[derive(Debug, Deserialize, Default)]
pub struct StandingsQuery {
    /// Season or "all" (default)
    pub year: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct WeeklyPerformanceQuery {
    /// Coach name or "all" (default)
    pub coach: Option<String>,
    /// Season or "all" (default)
    pub year: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/standings?year=<int|all>
pub async fn standings(
    State(state): State<AppState>,
    Query(query): Query<StandingsQuery>,
) -> Result<Json<Vec<StandingRow>>, ApiError> {
    let year = YearFilter::from_param(query.year.as_deref())?;
    let rows = state.blocking(move |store| store.standings(&year)).await??;
    Ok(Json(rows))
}

/// GET /api/head-to-head
pub async fn head_to_head(
    State(state): State<AppState>,
) -> Result<Json<Vec<HeadToHeadRow>>, ApiError> {
    let rows = state.blocking(|store| store.head_to_head()).await??;
    Ok(Json(rows))
}

/// GET /api/weekly-performance?coach=<string|all>&year=<int|all>
pub async fn weekly_performance(
    State(state): State<AppState>,
    Query(query): Query<WeeklyPerformanceQuery>,
) -> Result<Json<Vec<WeeklyPerformanceRow>>, ApiError> {
    let coach = CoachFilter::from_param(query.coach.as_deref());
    let year = YearFilter::from_param(query.year.as_deref())?;

    let rows = state
        .blocking(move |store| store.weekly_performance(&coach, &year))
        .await??;
    Ok(Json(rows))
}

/// GET /api/yearly-summary
pub async fn yearly_summary(
    State(state): State<AppState>,
) -> Result<Json<Vec<YearlySummaryRow>>, ApiError> {
    let rows = state.blocking(|store| store.yearly_summary()).await??;
    Ok(Json(rows))
}

/// GET /api/coaches
pub async fn coaches(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let coaches = state.blocking(|store| store.coaches()).await??;
    Ok(Json(coaches))
}

/// GET /api/years
pub async fn years(State(state): State<AppState>) -> Result<Json<Vec<i64>>, ApiError> {
    let years = state.blocking(|store| store.years()).await??;
    Ok(Json(years))
}

/// GET /api/coach-lookup
/// Roster-name mappings as loaded; not applied to the aggregates
pub async fn coach_lookup(
    State(state): State<AppState>,
) -> Result<Json<Vec<CoachLookupEntry>>, ApiError> {
    let entries = state.blocking(|store| store.coach_lookup()).await??;
    Ok(Json(entries))
}
