//! Unified error handling for the shift-logging API.
//!
//! Every error carries a stable machine-readable `kind` plus a
//! human-readable message; the JSON body shape is the same for all
//! failures so clients can switch on `kind` alone.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No valid caller identity presented.
    #[error("not authenticated: {0}")]
    NotAuthenticated(String),

    /// Authenticated but insufficient role.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Clock-in attempted while a shift is already open.
    #[error("a shift is already active; clock out first")]
    AlreadyActive,

    /// Clock-out attempted with nothing open.
    #[error("no active shift to clock out of")]
    NoActiveShift,

    /// Geofence check failed.
    #[error("{distance_m:.1} m from {facility} exceeds the allowed {radius_m:.1} m")]
    OutOfRange {
        /// Computed haversine distance from the facility center.
        distance_m: f64,
        /// Allowed admission radius.
        radius_m: f64,
        /// Facility name, for a precise client message.
        facility: String,
    },

    /// Malformed coordinates, missing required fields.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Persistence timeout/connection failure; safe to retry.
    #[error("storage temporarily unavailable, try again")]
    TransientStore,

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Stable machine-readable error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotAuthenticated(_) => "NOT_AUTHENTICATED",
            Self::AccessDenied(_) => "ACCESS_DENIED",
            Self::AlreadyActive => "ALREADY_ACTIVE",
            Self::NoActiveShift => "NO_ACTIVE_SHIFT",
            Self::OutOfRange { .. } => "OUT_OF_RANGE",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::TransientStore => "TRANSIENT_STORE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotAuthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::AccessDenied(_) => StatusCode::FORBIDDEN,
            Self::AlreadyActive | Self::NoActiveShift => StatusCode::CONFLICT,
            Self::OutOfRange { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::TransientStore => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        if err.is_transient() {
            return Self::TransientStore;
        }
        match err {
            RepositoryError::Conflict(_) => Self::AlreadyActive,
            RepositoryError::NotFound => Self::InvalidInput("no such record".to_owned()),
            err => Self::Internal(err.to_string()),
        }
    }
}

/// JSON error body returned for every failure.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance_m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    radius_m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    facility: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::Internal(_) | Self::TransientStore) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "API request error"
            );
        }

        let status = self.status();
        let kind = self.kind();

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Internal(_) => "Internal server error".to_owned(),
            _ => self.to_string(),
        };

        let (distance_m, radius_m, facility) = match self {
            Self::OutOfRange {
                distance_m,
                radius_m,
                facility,
            } => (
                Some(round1(distance_m)),
                Some(round1(radius_m)),
                Some(facility),
            ),
            _ => (None, None, None),
        };

        let body = ErrorBody {
            error: ErrorDetail {
                kind,
                message,
                distance_m,
                radius_m,
                facility,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Round to one decimal place for display; rounding happens only here,
/// at the output boundary.
fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::AccessDenied("managers only".to_owned());
        assert_eq!(err.to_string(), "access denied: managers only");

        let err = ApiError::AlreadyActive;
        assert_eq!(err.to_string(), "a shift is already active; clock out first");
    }

    #[test]
    fn test_api_error_status_codes() {
        fn get_status(err: ApiError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(ApiError::NotAuthenticated("no identity".to_owned())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(ApiError::AccessDenied("nope".to_owned())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(get_status(ApiError::AlreadyActive), StatusCode::CONFLICT);
        assert_eq!(get_status(ApiError::NoActiveShift), StatusCode::CONFLICT);
        assert_eq!(
            get_status(ApiError::OutOfRange {
                distance_m: 4750.0,
                radius_m: 2000.0,
                facility: "Lakeview Clinic".to_owned(),
            }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(ApiError::InvalidInput("bad latitude".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(ApiError::TransientStore),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            get_status(ApiError::Internal("boom".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_kinds_are_stable() {
        assert_eq!(ApiError::AlreadyActive.kind(), "ALREADY_ACTIVE");
        assert_eq!(ApiError::NoActiveShift.kind(), "NO_ACTIVE_SHIFT");
        assert_eq!(ApiError::TransientStore.kind(), "TRANSIENT_STORE");
        assert_eq!(
            ApiError::OutOfRange {
                distance_m: 1.0,
                radius_m: 1.0,
                facility: String::new()
            }
            .kind(),
            "OUT_OF_RANGE"
        );
    }

    #[test]
    fn test_transient_repository_errors_map_to_transient_store() {
        let err: ApiError = RepositoryError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, ApiError::TransientStore));

        let err: ApiError = RepositoryError::Conflict("open shift".to_owned()).into();
        assert!(matches!(err, ApiError::AlreadyActive));

        let err: ApiError = RepositoryError::DataCorruption("bad row".to_owned()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
