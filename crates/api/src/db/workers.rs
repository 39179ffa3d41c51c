//! Worker repository for database operations.
//!
//! Queries use the runtime `query_as` API with `FromRow` row types; rows
//! are converted to validated domain types before leaving this module.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use carelog_core::{Email, Role, WorkerId};

use super::RepositoryError;
use crate::models::Worker;

/// Internal row type for worker queries.
#[derive(Debug, sqlx::FromRow)]
struct WorkerRow {
    id: i32,
    external_id: String,
    email: String,
    name: String,
    role: Role,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<WorkerRow> for Worker {
    type Error = RepositoryError;

    fn try_from(row: WorkerRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: WorkerId::new(row.id),
            external_id: row.external_id,
            email,
            name: row.name,
            role: row.role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for worker database operations.
pub struct WorkerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WorkerRepository<'a> {
    /// Create a new worker repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a worker by their database ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: WorkerId) -> Result<Option<Worker>, RepositoryError> {
        let row = sqlx::query_as::<_, WorkerRow>(
            r"
            SELECT id, external_id, email, name, role, created_at, updated_at
            FROM worker
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a worker by the identity reference from the auth provider.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<Worker>, RepositoryError> {
        let row = sqlx::query_as::<_, WorkerRow>(
            r"
            SELECT id, external_id, email, name, role, created_at, updated_at
            FROM worker
            WHERE external_id = $1
            ",
        )
        .bind(external_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Find a worker by external ID, creating the record on first
    /// authenticated contact.
    ///
    /// The upsert keeps email and name current with what the identity
    /// provider asserts; the stored role is never overwritten by a login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn find_or_create(
        &self,
        external_id: &str,
        email: &Email,
        name: &str,
        default_role: Role,
    ) -> Result<Worker, RepositoryError> {
        let row = sqlx::query_as::<_, WorkerRow>(
            r"
            INSERT INTO worker (external_id, email, name, role)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (external_id) DO UPDATE
                SET email = EXCLUDED.email,
                    name = EXCLUDED.name,
                    updated_at = now()
            RETURNING id, external_id, email, name, role, created_at, updated_at
            ",
        )
        .bind(external_id)
        .bind(email.as_str())
        .bind(name)
        .bind(default_role)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Change a worker's role.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such worker exists.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_role(&self, id: WorkerId, role: Role) -> Result<Worker, RepositoryError> {
        let row = sqlx::query_as::<_, WorkerRow>(
            r"
            UPDATE worker
            SET role = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, external_id, email, name, role, created_at, updated_at
            ",
        )
        .bind(id.as_i32())
        .bind(role)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// List workers that currently have an open shift, newest clock-in
    /// first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_active(&self) -> Result<Vec<Worker>, RepositoryError> {
        let rows = sqlx::query_as::<_, WorkerRow>(
            r"
            SELECT w.id, w.external_id, w.email, w.name, w.role,
                   w.created_at, w.updated_at
            FROM worker w
            JOIN shift s ON s.worker_id = w.id AND s.clock_out_at IS NULL
            ORDER BY s.clock_in_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List all workers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Worker>, RepositoryError> {
        let rows = sqlx::query_as::<_, WorkerRow>(
            r"
            SELECT id, external_id, email, name, role, created_at, updated_at
            FROM worker
            ORDER BY name, id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
