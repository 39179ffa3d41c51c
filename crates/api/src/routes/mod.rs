//! HTTP route handlers for the shift-logging API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - DB connectivity check
//!
//! # Shifts (any authenticated worker, self-scoped)
//! POST /api/shifts/clock-in           - Open a shift
//! POST /api/shifts/clock-out          - Close the open shift
//! GET  /api/shifts/active             - Own active shift (204 when none)
//! GET  /api/shifts/stats              - Own trailing-window metrics
//! GET  /api/shifts                    - Own history, ?page=&page_size=
//!
//! # Manager
//! GET  /api/manager/active-workers    - Workers currently on shift
//! GET  /api/manager/shifts            - All shift logs, paginated
//! GET  /api/manager/dashboard         - Aggregate + per-worker stats
//! GET  /api/manager/facility          - Current geofence (204 when unset)
//! PUT  /api/manager/facility          - Replace the geofence
//! PUT  /api/manager/workers/{id}/role - Change a worker's role
//! ```

pub mod manager;
pub mod shifts;
pub mod types;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Build the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Shifts
        .route("/api/shifts/clock-in", post(shifts::clock_in))
        .route("/api/shifts/clock-out", post(shifts::clock_out))
        .route("/api/shifts/active", get(shifts::active))
        .route("/api/shifts/stats", get(shifts::own_stats))
        .route("/api/shifts", get(shifts::history))
        // Manager
        .route("/api/manager/active-workers", get(manager::active_workers))
        .route("/api/manager/shifts", get(manager::all_shifts))
        .route("/api/manager/dashboard", get(manager::dashboard))
        .route(
            "/api/manager/facility",
            get(manager::get_facility).put(manager::set_facility),
        )
        .route("/api/manager/workers/{id}/role", put(manager::set_role))
}
