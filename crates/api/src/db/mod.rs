//! Database operations for the shift-logging `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `worker` - Staff identities (find-or-create keyed by external ID)
//! - `shift` - One row per work session; a partial unique index keeps at
//!   most one open shift per worker
//! - `facility_location` - Singleton geofence row
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p carelog-cli -- migrate
//! ```

pub mod facility;
pub mod shifts;
pub mod workers;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use facility::FacilityRepository;
pub use shifts::ShiftRepository;
pub use workers::WorkerRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., the one-active-shift index).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Whether the failure is a connectivity/timeout problem the caller
    /// may safely retry, as opposed to a permanent fault.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Database(
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            )
        )
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// The bounded `acquire_timeout` keeps a stalled store from hanging
/// requests; pool exhaustion surfaces as a transient error.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_transient() {
        assert!(RepositoryError::Database(sqlx::Error::PoolTimedOut).is_transient());
        assert!(RepositoryError::Database(sqlx::Error::PoolClosed).is_transient());
    }

    #[test]
    fn test_logical_errors_are_permanent() {
        assert!(!RepositoryError::NotFound.is_transient());
        assert!(!RepositoryError::Conflict("duplicate".to_owned()).is_transient());
        assert!(!RepositoryError::DataCorruption("bad email".to_owned()).is_transient());
        assert!(!RepositoryError::Database(sqlx::Error::RowNotFound).is_transient());
    }
}
