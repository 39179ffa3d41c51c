//! Worker management commands.

use carelog_api::db::WorkerRepository;
use carelog_core::{Email, Role};

use super::CommandError;

/// Create a worker (or refresh an existing one keyed by external ID).
///
/// # Errors
///
/// Returns `CommandError::InvalidArgument` for a bad email or role.
pub async fn create(
    external_id: &str,
    email: &str,
    name: &str,
    role: &str,
) -> Result<(), CommandError> {
    let email: Email = email
        .parse()
        .map_err(|e| CommandError::InvalidArgument(format!("email: {e}")))?;
    let role: Role = role
        .parse()
        .map_err(|e| CommandError::InvalidArgument(format!("role: {e}")))?;

    let pool = super::connect().await?;
    let worker = WorkerRepository::new(&pool)
        .find_or_create(external_id, &email, name, role)
        .await?;

    tracing::info!(
        worker_id = %worker.id,
        external_id = %worker.external_id,
        role = %worker.role,
        "worker ready"
    );
    Ok(())
}

/// Change a worker's role, looked up by external ID.
///
/// # Errors
///
/// Returns `CommandError::InvalidArgument` for a bad role or unknown
/// worker.
pub async fn set_role(external_id: &str, role: &str) -> Result<(), CommandError> {
    let role: Role = role
        .parse()
        .map_err(|e| CommandError::InvalidArgument(format!("role: {e}")))?;

    let pool = super::connect().await?;
    let repo = WorkerRepository::new(&pool);

    let worker = repo
        .get_by_external_id(external_id)
        .await?
        .ok_or_else(|| CommandError::InvalidArgument(format!("no worker with external id {external_id}")))?;

    let worker = repo.set_role(worker.id, role).await?;

    tracing::info!(
        worker_id = %worker.id,
        role = %worker.role,
        "worker role changed"
    );
    Ok(())
}
