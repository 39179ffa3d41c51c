//! Great-circle distance math for geofence admission.
//!
//! Clock-in/out admission is a single question: is the caller's reported
//! position within the facility's radius? Invalid coordinates never error
//! here; they yield an infinite distance so every radius check fails
//! closed.

use crate::types::Coordinates;

/// Mean Earth radius in meters (IUGG).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine great-circle distance in meters between two raw coordinate
/// pairs.
///
/// Inputs are validated the same way as [`Coordinates::new`]; any
/// out-of-range or non-finite component returns `f64::INFINITY`, which
/// fails [`is_within_radius`] for every radius. Valid inputs are rounded
/// to 6 decimal places before the computation so retried requests with
/// identical literals get identical decisions.
#[must_use]
pub fn distance_meters(a_lat: f64, a_lng: f64, b_lat: f64, b_lng: f64) -> f64 {
    let (Ok(a), Ok(b)) = (Coordinates::new(a_lat, a_lng), Coordinates::new(b_lat, b_lng)) else {
        return f64::INFINITY;
    };
    distance_between(a, b)
}

/// Haversine distance in meters between two validated coordinates.
#[must_use]
pub fn distance_between(a: Coordinates, b: Coordinates) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Whether `distance` is admissible for a geofence of `radius` meters.
///
/// Strictly `distance <= radius`; an infinite distance (invalid input)
/// is never admissible.
#[must_use]
pub fn is_within_radius(distance: f64, radius: f64) -> bool {
    distance.is_finite() && distance <= radius
}
