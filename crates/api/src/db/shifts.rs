//! Shift repository for database operations.
//!
//! The one-active-shift invariant lives here: the `shift_one_active_per_worker`
//! partial unique index makes the insert in [`ShiftRepository::create_open`]
//! the atomic check-and-create, and the conditional update in
//! [`ShiftRepository::close_latest_active`] the atomic check-and-update.
//! In-memory locks would not survive multiple service instances.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use carelog_core::{Coordinates, ShiftId, WorkerId};

use super::RepositoryError;
use crate::models::ShiftRecord;

/// Internal row type for shift queries.
#[derive(Debug, sqlx::FromRow)]
struct ShiftRow {
    id: i32,
    worker_id: i32,
    clock_in_at: DateTime<Utc>,
    clock_out_at: Option<DateTime<Utc>>,
    clock_in_note: Option<String>,
    clock_out_note: Option<String>,
    clock_in_lat: Option<f64>,
    clock_in_lng: Option<f64>,
    clock_out_lat: Option<f64>,
    clock_out_lng: Option<f64>,
}

/// Rebuild an optional coordinate pair from its two nullable columns.
fn coordinates_from_columns(
    lat: Option<f64>,
    lng: Option<f64>,
    which: &str,
) -> Result<Option<Coordinates>, RepositoryError> {
    match (lat, lng) {
        (None, None) => Ok(None),
        (Some(lat), Some(lng)) => Coordinates::new(lat, lng).map(Some).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid {which} coordinates in database: {e}"))
        }),
        _ => Err(RepositoryError::DataCorruption(format!(
            "half-set {which} coordinates in database"
        ))),
    }
}

impl TryFrom<ShiftRow> for ShiftRecord {
    type Error = RepositoryError;

    fn try_from(row: ShiftRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ShiftId::new(row.id),
            worker_id: WorkerId::new(row.worker_id),
            clock_in_at: row.clock_in_at,
            clock_out_at: row.clock_out_at,
            clock_in_note: row.clock_in_note,
            clock_out_note: row.clock_out_note,
            clock_in_location: coordinates_from_columns(
                row.clock_in_lat,
                row.clock_in_lng,
                "clock-in",
            )?,
            clock_out_location: coordinates_from_columns(
                row.clock_out_lat,
                row.clock_out_lng,
                "clock-out",
            )?,
        })
    }
}

const SHIFT_COLUMNS: &str = "id, worker_id, clock_in_at, clock_out_at, \
                             clock_in_note, clock_out_note, \
                             clock_in_lat, clock_in_lng, clock_out_lat, clock_out_lng";

/// Repository for shift database operations.
pub struct ShiftRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShiftRepository<'a> {
    /// Create a new shift repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a worker's open shift, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn find_active(
        &self,
        worker_id: WorkerId,
    ) -> Result<Option<ShiftRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, ShiftRow>(&format!(
            r"
            SELECT {SHIFT_COLUMNS}
            FROM shift
            WHERE worker_id = $1 AND clock_out_at IS NULL
            ORDER BY clock_in_at DESC
            LIMIT 1
            "
        ))
        .bind(worker_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Open a shift for a worker with `clock_in_at = now()`.
    ///
    /// The insert races on the partial unique index; a second concurrent
    /// clock-in loses with `RepositoryError::Conflict`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the worker already has an
    /// open shift.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_open(
        &self,
        worker_id: WorkerId,
        note: Option<&str>,
        location: Option<Coordinates>,
    ) -> Result<ShiftRecord, RepositoryError> {
        let row = sqlx::query_as::<_, ShiftRow>(&format!(
            r"
            INSERT INTO shift (worker_id, clock_in_note, clock_in_lat, clock_in_lng)
            VALUES ($1, $2, $3, $4)
            RETURNING {SHIFT_COLUMNS}
            "
        ))
        .bind(worker_id.as_i32())
        .bind(note)
        .bind(location.map(|c| c.latitude))
        .bind(location.map(|c| c.longitude))
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("worker already has an open shift".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Close a worker's open shift with `clock_out_at = now()`.
    ///
    /// Targets the most recently opened active record (latest
    /// `clock_in_at` wins if the invariant was somehow violated). Returns
    /// `None` when the worker has nothing open; a concurrent double
    /// clock-out loses cleanly on the `clock_out_at IS NULL` guard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn close_latest_active(
        &self,
        worker_id: WorkerId,
        note: Option<&str>,
        location: Option<Coordinates>,
    ) -> Result<Option<ShiftRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, ShiftRow>(&format!(
            r"
            UPDATE shift
            SET clock_out_at = now(),
                clock_out_note = $2,
                clock_out_lat = $3,
                clock_out_lng = $4
            WHERE id = (
                SELECT id FROM shift
                WHERE worker_id = $1 AND clock_out_at IS NULL
                ORDER BY clock_in_at DESC
                LIMIT 1
            )
            AND clock_out_at IS NULL
            RETURNING {SHIFT_COLUMNS}
            "
        ))
        .bind(worker_id.as_i32())
        .bind(note)
        .bind(location.map(|c| c.latitude))
        .bind(location.map(|c| c.longitude))
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// A worker's shift history, newest clock-in first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn history_for(
        &self,
        worker_id: WorkerId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ShiftRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, ShiftRow>(&format!(
            r"
            SELECT {SHIFT_COLUMNS}
            FROM shift
            WHERE worker_id = $1
            ORDER BY clock_in_at DESC
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(worker_id.as_i32())
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// All shift logs system-wide, newest clock-in first (manager audit
    /// view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ShiftRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, ShiftRow>(&format!(
            r"
            SELECT {SHIFT_COLUMNS}
            FROM shift
            ORDER BY clock_in_at DESC
            LIMIT $1 OFFSET $2
            "
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// A worker's shifts with `clock_in_at >= cutoff`, used by the stats
    /// aggregator to scan a trailing window.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_for_worker_since(
        &self,
        worker_id: WorkerId,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<ShiftRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, ShiftRow>(&format!(
            r"
            SELECT {SHIFT_COLUMNS}
            FROM shift
            WHERE worker_id = $1 AND clock_in_at >= $2
            ORDER BY clock_in_at DESC
            "
        ))
        .bind(worker_id.as_i32())
        .bind(cutoff)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// All shifts (any worker) with `clock_in_at >= cutoff`, used to
    /// build the per-worker dashboard rows in one scan.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_started_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<ShiftRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, ShiftRow>(&format!(
            r"
            SELECT {SHIFT_COLUMNS}
            FROM shift
            WHERE clock_in_at >= $1
            ORDER BY clock_in_at DESC
            "
        ))
        .bind(cutoff)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Count of workers with an open shift.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_active(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT worker_id) FROM shift WHERE clock_out_at IS NULL",
        )
        .fetch_one(self.pool)
        .await?;
        Ok(count)
    }
}
