//! Facility geofence repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use carelog_core::Coordinates;

use super::RepositoryError;
use crate::models::FacilityLocation;

/// Internal row type for the singleton facility row.
#[derive(Debug, sqlx::FromRow)]
struct FacilityRow {
    name: String,
    latitude: f64,
    longitude: f64,
    radius_m: f64,
    updated_at: DateTime<Utc>,
}

impl TryFrom<FacilityRow> for FacilityLocation {
    type Error = RepositoryError;

    fn try_from(row: FacilityRow) -> Result<Self, Self::Error> {
        let center = Coordinates::new(row.latitude, row.longitude).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid facility coordinates in database: {e}"))
        })?;

        Ok(Self {
            name: row.name,
            center,
            radius_m: row.radius_m,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for the facility geofence configuration.
pub struct FacilityRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FacilityRepository<'a> {
    /// Create a new facility repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Read the configured geofence, if any.
    ///
    /// Readers always see a fully-formed row; updates replace the record
    /// in a single statement.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get(&self) -> Result<Option<FacilityLocation>, RepositoryError> {
        let row = sqlx::query_as::<_, FacilityRow>(
            r"
            SELECT name, latitude, longitude, radius_m, updated_at
            FROM facility_location
            WHERE id = 1
            ",
        )
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Replace the geofence wholesale.
    ///
    /// One upsert statement, so concurrent clock operations never observe
    /// a half-updated location (e.g., new latitude with old radius).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn upsert(
        &self,
        name: &str,
        center: Coordinates,
        radius_m: f64,
    ) -> Result<FacilityLocation, RepositoryError> {
        let row = sqlx::query_as::<_, FacilityRow>(
            r"
            INSERT INTO facility_location (id, name, latitude, longitude, radius_m)
            VALUES (1, $1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
                SET name = EXCLUDED.name,
                    latitude = EXCLUDED.latitude,
                    longitude = EXCLUDED.longitude,
                    radius_m = EXCLUDED.radius_m,
                    updated_at = now()
            RETURNING name, latitude, longitude, radius_m, updated_at
            ",
        )
        .bind(name)
        .bind(center.latitude)
        .bind(center.longitude)
        .bind(radius_m)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }
}
