//! Facility geofence command.

use carelog_api::db::FacilityRepository;
use carelog_core::Coordinates;

use super::CommandError;

/// Replace the facility geofence wholesale.
///
/// # Errors
///
/// Returns `CommandError::InvalidArgument` for bad coordinates or a
/// non-positive radius.
pub async fn set(name: &str, lat: f64, lng: f64, radius_m: f64) -> Result<(), CommandError> {
    let center = Coordinates::new(lat, lng)
        .map_err(|e| CommandError::InvalidArgument(e.to_string()))?;
    if !radius_m.is_finite() || radius_m <= 0.0 {
        return Err(CommandError::InvalidArgument(
            "radius must be a positive number of meters".to_owned(),
        ));
    }

    let pool = super::connect().await?;
    let facility = FacilityRepository::new(&pool)
        .upsert(name, center, radius_m)
        .await?;

    tracing::info!(
        facility = %facility.name,
        lat = facility.center.latitude,
        lng = facility.center.longitude,
        radius_m = facility.radius_m,
        "facility geofence replaced"
    );
    Ok(())
}
