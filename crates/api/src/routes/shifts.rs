//! Self-scoped shift routes: clock-in, clock-out, active shift, history.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::middleware::RequireAuth;
use crate::routes::types::{ClockRequest, PageParams, ShiftResponse};
use crate::services::{Operation, ShiftLedger, StatsAggregator, authorize, stats::PerWorkerStats};
use crate::state::AppState;

/// Open a shift for the caller.
///
/// POST /api/shifts/clock-in
///
/// # Errors
///
/// `ALREADY_ACTIVE` if a shift is open, `OUT_OF_RANGE` on a failed
/// geofence check, `INVALID_INPUT` for malformed coordinates.
pub async fn clock_in(
    State(state): State<AppState>,
    RequireAuth(worker): RequireAuth,
    Json(body): Json<ClockRequest>,
) -> Result<(StatusCode, Json<ShiftResponse>), ApiError> {
    authorize(worker.role, Operation::ClockIn)?;
    let location = body.location()?;

    let record = ShiftLedger::new(state.pool())
        .clock_in(worker.id, body.note.as_deref(), location)
        .await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Close the caller's open shift.
///
/// POST /api/shifts/clock-out
///
/// # Errors
///
/// `NO_ACTIVE_SHIFT` if nothing is open, `OUT_OF_RANGE` on a failed
/// geofence check.
pub async fn clock_out(
    State(state): State<AppState>,
    RequireAuth(worker): RequireAuth,
    Json(body): Json<ClockRequest>,
) -> Result<Json<ShiftResponse>, ApiError> {
    authorize(worker.role, Operation::ClockOut)?;
    let location = body.location()?;

    let record = ShiftLedger::new(state.pool())
        .clock_out(worker.id, body.note.as_deref(), location)
        .await?;

    Ok(Json(record.into()))
}

/// The caller's open shift; 204 when none.
///
/// GET /api/shifts/active
///
/// # Errors
///
/// Store failures surface as `TRANSIENT_STORE` or `INTERNAL`.
pub async fn active(
    State(state): State<AppState>,
    RequireAuth(worker): RequireAuth,
) -> Result<Response, ApiError> {
    authorize(worker.role, Operation::ViewOwnHistory)?;

    let record = ShiftLedger::new(state.pool())
        .active_shift_for(worker.id)
        .await?;

    Ok(match record {
        Some(record) => Json(ShiftResponse::from(record)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// The caller's own trailing-window metrics.
///
/// GET /api/shifts/stats
///
/// # Errors
///
/// Store failures surface as `TRANSIENT_STORE` or `INTERNAL`.
pub async fn own_stats(
    State(state): State<AppState>,
    RequireAuth(worker): RequireAuth,
) -> Result<Json<PerWorkerStats>, ApiError> {
    authorize(worker.role, Operation::ViewOwnHistory)?;

    let stats = StatsAggregator::new(state.pool())
        .per_worker(worker.id, &worker.name)
        .await?;

    Ok(Json(stats))
}

/// The caller's shift history, newest first.
///
/// GET /api/shifts?page=&page_size=
///
/// # Errors
///
/// Store failures surface as `TRANSIENT_STORE` or `INTERNAL`.
pub async fn history(
    State(state): State<AppState>,
    RequireAuth(worker): RequireAuth,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<ShiftResponse>>, ApiError> {
    authorize(worker.role, Operation::ViewOwnHistory)?;

    let records = ShiftLedger::new(state.pool())
        .history_for(worker.id, params.page, params.page_size)
        .await?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}
