//! Shift lifecycle service.
//!
//! Per worker the state machine has two states, NO_ACTIVE_SHIFT and
//! ACTIVE_SHIFT, with clock-in and clock-out the only transitions.
//! Attempting clock-in while active or clock-out while idle are user
//! errors, not system faults. The atomic enforcement of the
//! one-active-shift invariant lives in the repository's partial unique
//! index; this service layers the geofence admission check and the
//! friendly pre-checks on top.

use sqlx::PgPool;

use carelog_core::{Coordinates, WorkerId, geo};

use crate::db::{FacilityRepository, ShiftRepository};
use crate::error::ApiError;
use crate::models::{FacilityLocation, ShiftRecord};

/// Default page size for history listings.
pub const DEFAULT_PAGE_SIZE: i64 = 20;
/// Upper bound on page size.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Shift lifecycle service.
pub struct ShiftLedger<'a> {
    shifts: ShiftRepository<'a>,
    facility: FacilityRepository<'a>,
}

impl<'a> ShiftLedger<'a> {
    /// Create a new ledger over the shared pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            shifts: ShiftRepository::new(pool),
            facility: FacilityRepository::new(pool),
        }
    }

    /// Open a shift for `worker_id` with the server clock.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AlreadyActive` if the worker has an open shift
    /// (pre-check or the unique-index race, whichever fires first).
    /// Returns `ApiError::OutOfRange` if a geofence is configured, the
    /// caller supplied a position, and it falls outside the radius.
    /// Returns `ApiError::TransientStore`/`ApiError::Internal` on store
    /// failures; the geofence read failing aborts the clock-in (fail
    /// closed) rather than skipping the check.
    pub async fn clock_in(
        &self,
        worker_id: WorkerId,
        note: Option<&str>,
        location: Option<Coordinates>,
    ) -> Result<ShiftRecord, ApiError> {
        if self.shifts.find_active(worker_id).await?.is_some() {
            return Err(ApiError::AlreadyActive);
        }

        self.check_geofence(location).await?;

        let record = self.shifts.create_open(worker_id, note, location).await?;
        tracing::info!(
            worker_id = %worker_id,
            shift_id = %record.id,
            "worker clocked in"
        );
        Ok(record)
    }

    /// Close the worker's open shift with the server clock.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NoActiveShift` if nothing is open.
    /// Returns `ApiError::OutOfRange` on a failed geofence check, same as
    /// clock-in.
    pub async fn clock_out(
        &self,
        worker_id: WorkerId,
        note: Option<&str>,
        location: Option<Coordinates>,
    ) -> Result<ShiftRecord, ApiError> {
        self.check_geofence(location).await?;

        let record = self
            .shifts
            .close_latest_active(worker_id, note, location)
            .await?
            .ok_or(ApiError::NoActiveShift)?;

        tracing::info!(
            worker_id = %worker_id,
            shift_id = %record.id,
            duration_minutes = record.duration_minutes(),
            "worker clocked out"
        );
        Ok(record)
    }

    /// The worker's open shift, if any.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::TransientStore`/`ApiError::Internal` on store
    /// failures.
    pub async fn active_shift_for(
        &self,
        worker_id: WorkerId,
    ) -> Result<Option<ShiftRecord>, ApiError> {
        Ok(self.shifts.find_active(worker_id).await?)
    }

    /// The worker's shift history, newest clock-in first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::TransientStore`/`ApiError::Internal` on store
    /// failures.
    pub async fn history_for(
        &self,
        worker_id: WorkerId,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Vec<ShiftRecord>, ApiError> {
        let (limit, offset) = page_to_limit_offset(page, page_size);
        Ok(self.shifts.history_for(worker_id, limit, offset).await?)
    }

    /// All shift logs system-wide, newest clock-in first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::TransientStore`/`ApiError::Internal` on store
    /// failures.
    pub async fn all_shifts(
        &self,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Vec<ShiftRecord>, ApiError> {
        let (limit, offset) = page_to_limit_offset(page, page_size);
        Ok(self.shifts.list_all(limit, offset).await?)
    }

    /// Validate the caller's reported position against the configured
    /// geofence.
    ///
    /// No geofence configured, or no position supplied, admits trivially.
    /// A failed facility read aborts the operation.
    async fn check_geofence(&self, location: Option<Coordinates>) -> Result<(), ApiError> {
        let Some(point) = location else {
            return Ok(());
        };
        let Some(facility) = self.facility.get().await? else {
            return Ok(());
        };
        check_admission(&facility, point)
    }
}

/// Pure geofence admission decision.
///
/// # Errors
///
/// Returns `ApiError::OutOfRange` carrying the computed distance, the
/// allowed radius, and the facility name.
pub fn check_admission(facility: &FacilityLocation, point: Coordinates) -> Result<(), ApiError> {
    let distance_m = facility.distance_to(point);
    if geo::is_within_radius(distance_m, facility.radius_m) {
        return Ok(());
    }
    Err(ApiError::OutOfRange {
        distance_m,
        radius_m: facility.radius_m,
        facility: facility.name.clone(),
    })
}

/// Translate 1-based page / page-size query parameters into LIMIT/OFFSET,
/// clamping to sane bounds.
#[must_use]
pub fn page_to_limit_offset(page: Option<i64>, page_size: Option<i64>) -> (i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let limit = page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    (limit, (page - 1) * limit)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn facility() -> FacilityLocation {
        FacilityLocation {
            name: "Lakeview Clinic".to_owned(),
            center: Coordinates::new(13.067014, 77.466541).unwrap(),
            radius_m: 2000.0,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_admission_at_center() {
        let f = facility();
        assert!(check_admission(&f, f.center).is_ok());
    }

    #[test]
    fn test_admission_outside_radius_reports_details() {
        let f = facility();
        let point = Coordinates::new(13.1, 77.5).unwrap();
        let err = check_admission(&f, point).unwrap_err();
        match err {
            ApiError::OutOfRange {
                distance_m,
                radius_m,
                facility,
            } => {
                assert!(distance_m > 2000.0, "got {distance_m}");
                assert!((4000.0..5500.0).contains(&distance_m), "got {distance_m}");
                assert!((radius_m - 2000.0).abs() < f64::EPSILON);
                assert_eq!(facility, "Lakeview Clinic");
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_pagination_defaults_and_clamps() {
        assert_eq!(page_to_limit_offset(None, None), (20, 0));
        assert_eq!(page_to_limit_offset(Some(3), Some(10)), (10, 20));
        assert_eq!(page_to_limit_offset(Some(0), Some(10)), (10, 0));
        assert_eq!(page_to_limit_offset(Some(-5), None), (20, 0));
        assert_eq!(page_to_limit_offset(Some(1), Some(1000)), (100, 0));
        assert_eq!(page_to_limit_offset(Some(1), Some(0)), (1, 0));
    }
}
