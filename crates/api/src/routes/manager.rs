//! Manager-only routes: system-wide views, dashboard, geofence and role
//! administration.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use carelog_core::WorkerId;

use crate::db::{FacilityRepository, WorkerRepository};
use crate::error::ApiError;
use crate::middleware::RequireAuth;
use crate::routes::types::{
    FacilityRequest, FacilityResponse, PageParams, RoleRequest, ShiftResponse, WorkerResponse,
};
use crate::services::stats::DashboardStats;
use crate::services::{Operation, ShiftLedger, StatsAggregator, authorize};
use crate::state::AppState;

/// Workers currently on shift.
///
/// GET /api/manager/active-workers
///
/// # Errors
///
/// `ACCESS_DENIED` for non-managers.
pub async fn active_workers(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
) -> Result<Json<Vec<WorkerResponse>>, ApiError> {
    authorize(caller.role, Operation::ListActiveWorkers)?;

    let workers = WorkerRepository::new(state.pool()).list_active().await?;
    Ok(Json(workers.into_iter().map(Into::into).collect()))
}

/// All shift logs, newest first.
///
/// GET /api/manager/shifts?page=&page_size=
///
/// # Errors
///
/// `ACCESS_DENIED` for non-managers.
pub async fn all_shifts(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<ShiftResponse>>, ApiError> {
    authorize(caller.role, Operation::ListAllShifts)?;

    let records = ShiftLedger::new(state.pool())
        .all_shifts(params.page, params.page_size)
        .await?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// Aggregate + per-worker dashboard statistics.
///
/// GET /api/manager/dashboard
///
/// # Errors
///
/// `ACCESS_DENIED` for non-managers.
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
) -> Result<Json<DashboardStats>, ApiError> {
    authorize(caller.role, Operation::ViewDashboard)?;

    let stats = StatsAggregator::new(state.pool()).dashboard().await?;
    Ok(Json(stats))
}

/// The configured geofence; 204 when unset.
///
/// GET /api/manager/facility
///
/// # Errors
///
/// `ACCESS_DENIED` for non-managers.
pub async fn get_facility(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
) -> Result<Response, ApiError> {
    authorize(caller.role, Operation::SetFacilityLocation)?;

    let facility = FacilityRepository::new(state.pool()).get().await?;
    Ok(match facility {
        Some(facility) => Json(FacilityResponse::from(facility)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// Replace the geofence wholesale.
///
/// PUT /api/manager/facility
///
/// # Errors
///
/// `ACCESS_DENIED` for non-managers, `INVALID_INPUT` for a malformed
/// definition.
pub async fn set_facility(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Json(body): Json<FacilityRequest>,
) -> Result<Json<FacilityResponse>, ApiError> {
    authorize(caller.role, Operation::SetFacilityLocation)?;
    let center = body.validate()?;

    let facility = FacilityRepository::new(state.pool())
        .upsert(body.name.trim(), center, body.radius_m)
        .await?;

    tracing::info!(
        facility = %facility.name,
        radius_m = facility.radius_m,
        "facility geofence replaced"
    );
    Ok(Json(facility.into()))
}

/// Change a worker's role.
///
/// PUT /api/manager/workers/{id}/role
///
/// # Errors
///
/// `ACCESS_DENIED` for non-managers, `INVALID_INPUT` for an unknown
/// worker.
pub async fn set_role(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(id): Path<i32>,
    Json(body): Json<RoleRequest>,
) -> Result<Json<WorkerResponse>, ApiError> {
    authorize(caller.role, Operation::ChangeWorkerRole)?;

    let worker = WorkerRepository::new(state.pool())
        .set_role(WorkerId::new(id), body.role)
        .await?;

    tracing::info!(
        worker_id = %worker.id,
        role = %worker.role,
        changed_by = %caller.id,
        "worker role changed"
    );
    Ok(Json(worker.into()))
}
