//! Worker domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use carelog_core::{Email, Role, WorkerId};

/// A worker (domain type).
#[derive(Debug, Clone)]
pub struct Worker {
    /// Unique worker ID.
    pub id: WorkerId,
    /// Identity reference from the authentication provider.
    pub external_id: String,
    /// Worker's email address.
    pub email: Email,
    /// Worker's display name.
    pub name: String,
    /// Worker's role.
    pub role: Role,
    /// When the worker was created.
    pub created_at: DateTime<Utc>,
    /// When the worker was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The authenticated caller, resolved by the auth extractor on every
/// request.
///
/// Carries just enough to gate and attribute operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWorker {
    /// Database ID of the worker.
    pub id: WorkerId,
    /// Identity reference from the authentication provider.
    pub external_id: String,
    /// Display name.
    pub name: String,
    /// Role used by the access policy.
    pub role: Role,
}

impl From<&Worker> for CurrentWorker {
    fn from(worker: &Worker) -> Self {
        Self {
            id: worker.id,
            external_id: worker.external_id.clone(),
            name: worker.name.clone(),
            role: worker.role,
        }
    }
}
