//! Validated GPS coordinates.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing [`Coordinates`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CoordinatesError {
    /// Latitude outside [-90, 90] or not finite.
    #[error("latitude must be a finite value in [-90, 90], got {0}")]
    InvalidLatitude(f64),
    /// Longitude outside [-180, 180] or not finite.
    #[error("longitude must be a finite value in [-180, 180], got {0}")]
    InvalidLongitude(f64),
}

/// A validated (latitude, longitude) pair.
///
/// Values are rounded to 6 decimal places (~11 cm) on construction so that
/// retried requests carrying the same literal coordinates always produce
/// the same admission decision, free of floating-point jitter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees, [-90, 90].
    pub latitude: f64,
    /// Longitude in degrees, [-180, 180].
    pub longitude: f64,
}

impl Coordinates {
    /// Construct validated coordinates.
    ///
    /// # Errors
    ///
    /// Returns `CoordinatesError` if either value is non-finite or out of
    /// range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinatesError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinatesError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinatesError::InvalidLongitude(longitude));
        }

        Ok(Self {
            latitude: round6(latitude),
            longitude: round6(longitude),
        })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Round to 6 decimal places.
fn round6(v: f64) -> f64 {
    (v * 1_000_000.0).round() / 1_000_000.0
}
