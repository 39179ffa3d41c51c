//! Boundary request/response types.
//!
//! All transport payloads are explicit structs validated here before
//! anything reaches the services; nothing dynamically-typed crosses this
//! boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use carelog_core::{Coordinates, Role, ShiftId, WorkerId};

use crate::error::ApiError;
use crate::models::{FacilityLocation, ShiftRecord, Worker};

/// Body for clock-in and clock-out.
#[derive(Debug, Deserialize)]
pub struct ClockRequest {
    /// Optional free-text note.
    pub note: Option<String>,
    /// Optional reported latitude; must be paired with `longitude`.
    pub latitude: Option<f64>,
    /// Optional reported longitude; must be paired with `latitude`.
    pub longitude: Option<f64>,
}

impl ClockRequest {
    /// Validate the optional coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` for a half-supplied pair or
    /// out-of-range values.
    pub fn location(&self) -> Result<Option<Coordinates>, ApiError> {
        match (self.latitude, self.longitude) {
            (None, None) => Ok(None),
            (Some(lat), Some(lng)) => Coordinates::new(lat, lng)
                .map(Some)
                .map_err(|e| ApiError::InvalidInput(e.to_string())),
            _ => Err(ApiError::InvalidInput(
                "latitude and longitude must be supplied together".to_owned(),
            )),
        }
    }
}

/// Pagination query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    /// 1-based page number.
    pub page: Option<i64>,
    /// Rows per page, clamped server-side.
    pub page_size: Option<i64>,
}

/// Body for replacing the facility geofence.
#[derive(Debug, Deserialize)]
pub struct FacilityRequest {
    /// Facility display name.
    pub name: String,
    /// Geofence center latitude.
    pub latitude: f64,
    /// Geofence center longitude.
    pub longitude: f64,
    /// Admission radius in meters.
    pub radius_m: f64,
}

impl FacilityRequest {
    /// Validate the geofence definition.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` for an empty name, bad
    /// coordinates, or a non-positive radius.
    pub fn validate(&self) -> Result<Coordinates, ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::InvalidInput("facility name is required".to_owned()));
        }
        if !self.radius_m.is_finite() || self.radius_m <= 0.0 {
            return Err(ApiError::InvalidInput(
                "radius_m must be a positive number of meters".to_owned(),
            ));
        }
        Coordinates::new(self.latitude, self.longitude)
            .map_err(|e| ApiError::InvalidInput(e.to_string()))
    }
}

/// Body for changing a worker's role.
#[derive(Debug, Deserialize)]
pub struct RoleRequest {
    /// New role.
    pub role: Role,
}

/// A shift record as rendered to clients.
#[derive(Debug, Serialize)]
pub struct ShiftResponse {
    pub id: ShiftId,
    pub worker_id: WorkerId,
    pub clock_in_at: DateTime<Utc>,
    pub clock_out_at: Option<DateTime<Utc>>,
    pub clock_in_note: Option<String>,
    pub clock_out_note: Option<String>,
    pub clock_in_location: Option<Coordinates>,
    pub clock_out_location: Option<Coordinates>,
    /// Derived from the stored timestamps; absent while the shift is open.
    pub duration_minutes: Option<i64>,
}

impl From<ShiftRecord> for ShiftResponse {
    fn from(record: ShiftRecord) -> Self {
        let duration_minutes = record.duration_minutes();
        Self {
            id: record.id,
            worker_id: record.worker_id,
            clock_in_at: record.clock_in_at,
            clock_out_at: record.clock_out_at,
            clock_in_note: record.clock_in_note,
            clock_out_note: record.clock_out_note,
            clock_in_location: record.clock_in_location,
            clock_out_location: record.clock_out_location,
            duration_minutes,
        }
    }
}

/// A worker as rendered to clients.
#[derive(Debug, Serialize)]
pub struct WorkerResponse {
    pub id: WorkerId,
    pub external_id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl From<Worker> for WorkerResponse {
    fn from(worker: Worker) -> Self {
        Self {
            id: worker.id,
            external_id: worker.external_id,
            email: worker.email.into_inner(),
            name: worker.name,
            role: worker.role,
        }
    }
}

/// The facility geofence as rendered to clients.
#[derive(Debug, Serialize)]
pub struct FacilityResponse {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_m: f64,
    pub updated_at: DateTime<Utc>,
}

impl From<FacilityLocation> for FacilityResponse {
    fn from(facility: FacilityLocation) -> Self {
        Self {
            name: facility.name,
            latitude: facility.center.latitude,
            longitude: facility.center.longitude,
            radius_m: facility.radius_m,
            updated_at: facility.updated_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_request_accepts_full_pair() {
        let req = ClockRequest {
            note: None,
            latitude: Some(13.067014),
            longitude: Some(77.466541),
        };
        assert!(req.location().unwrap().is_some());
    }

    #[test]
    fn test_clock_request_accepts_no_location() {
        let req = ClockRequest {
            note: Some("start of rounds".to_owned()),
            latitude: None,
            longitude: None,
        };
        assert!(req.location().unwrap().is_none());
    }

    #[test]
    fn test_clock_request_rejects_half_pair() {
        let req = ClockRequest {
            note: None,
            latitude: Some(13.0),
            longitude: None,
        };
        assert!(matches!(req.location(), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_clock_request_rejects_out_of_range() {
        let req = ClockRequest {
            note: None,
            latitude: Some(95.0),
            longitude: Some(0.0),
        };
        assert!(matches!(req.location(), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_facility_request_validation() {
        let good = FacilityRequest {
            name: "Lakeview Clinic".to_owned(),
            latitude: 13.067014,
            longitude: 77.466541,
            radius_m: 2000.0,
        };
        assert!(good.validate().is_ok());

        let bad_radius = FacilityRequest { radius_m: 0.0, ..good_clone(&good) };
        assert!(bad_radius.validate().is_err());

        let bad_name = FacilityRequest { name: "  ".to_owned(), ..good_clone(&good) };
        assert!(bad_name.validate().is_err());
    }

    fn good_clone(f: &FacilityRequest) -> FacilityRequest {
        FacilityRequest {
            name: f.name.clone(),
            latitude: f.latitude,
            longitude: f.longitude,
            radius_m: f.radius_m,
        }
    }
}
