//! Role-based authorization gate.
//!
//! A pure predicate over (caller role, operation kind) with no side
//! effects. Unauthenticated callers never reach this module; the auth
//! extractor rejects them first.

use carelog_core::Role;

use crate::error::ApiError;

/// The operations the transport layer can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Open a shift for oneself.
    ClockIn,
    /// Close one's open shift.
    ClockOut,
    /// View one's own shift history and active shift.
    ViewOwnHistory,
    /// List workers currently on shift, system-wide.
    ListActiveWorkers,
    /// List all shift logs, system-wide.
    ListAllShifts,
    /// View aggregate dashboard statistics.
    ViewDashboard,
    /// Change another worker's role.
    ChangeWorkerRole,
    /// Replace the facility geofence.
    SetFacilityLocation,
}

impl Operation {
    /// Whether the operation is restricted to managers.
    #[must_use]
    pub const fn manager_only(self) -> bool {
        match self {
            Self::ClockIn | Self::ClockOut | Self::ViewOwnHistory => false,
            Self::ListActiveWorkers
            | Self::ListAllShifts
            | Self::ViewDashboard
            | Self::ChangeWorkerRole
            | Self::SetFacilityLocation => true,
        }
    }
}

/// Gate `operation` for a caller with `role`.
///
/// # Errors
///
/// Returns `ApiError::AccessDenied` when the role is insufficient.
pub fn authorize(role: Role, operation: Operation) -> Result<(), ApiError> {
    if operation.manager_only() && !role.is_manager() {
        return Err(ApiError::AccessDenied(format!(
            "{operation:?} requires the MANAGER role"
        )));
    }
    Ok(())
}
