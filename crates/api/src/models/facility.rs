//! Facility geofence domain type.

use chrono::{DateTime, Utc};

use carelog_core::{Coordinates, geo};

/// The admission geofence: a named center coordinate plus a radius in
/// meters.
///
/// Single row in this deployment; replaced as a whole record by manager
/// action so concurrent clock operations never observe a half-updated
/// location.
#[derive(Debug, Clone)]
pub struct FacilityLocation {
    /// Human-readable facility name, echoed in out-of-range errors.
    pub name: String,
    /// Geofence center.
    pub center: Coordinates,
    /// Admission radius in meters.
    pub radius_m: f64,
    /// When the geofence was last replaced.
    pub updated_at: DateTime<Utc>,
}

impl FacilityLocation {
    /// Distance in meters from the geofence center to `point`.
    #[must_use]
    pub fn distance_to(&self, point: Coordinates) -> f64 {
        geo::distance_between(self.center, point)
    }

    /// Whether `point` is admissible.
    #[must_use]
    pub fn admits(&self, point: Coordinates) -> bool {
        geo::is_within_radius(self.distance_to(point), self.radius_m)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn facility() -> FacilityLocation {
        FacilityLocation {
            name: "Lakeview Clinic".to_owned(),
            center: Coordinates::new(13.067014, 77.466541).unwrap(),
            radius_m: 2000.0,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_admits_center() {
        let f = facility();
        assert!(f.admits(f.center));
    }

    #[test]
    fn test_rejects_point_outside_radius() {
        let f = facility();
        let away = Coordinates::new(13.1, 77.5).unwrap();
        assert!(!f.admits(away));
        assert!(f.distance_to(away) > 2000.0);
    }
}
