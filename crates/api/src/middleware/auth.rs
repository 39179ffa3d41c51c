//! Authentication extractor.
//!
//! Token verification is not this service's job: the fronting auth proxy
//! verifies credentials and injects identity headers, which the edge
//! strips from untrusted traffic. This module is the single `AuthVerifier`
//! implementation — one contract, no fallback variants: either the
//! headers yield a verified `(external_id, role, email, name)` tuple or
//! the request is rejected.
//!
//! On every authenticated request the worker record is found-or-created,
//! so first contact registers the worker.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};

use carelog_core::{Email, Role};

use crate::db::WorkerRepository;
use crate::error::ApiError;
use crate::models::CurrentWorker;
use crate::state::AppState;

/// Identity header names, set by the auth proxy.
pub const EXTERNAL_ID_HEADER: &str = "x-auth-external-id";
pub const EMAIL_HEADER: &str = "x-auth-email";
pub const NAME_HEADER: &str = "x-auth-name";
pub const ROLE_HEADER: &str = "x-auth-role";

/// The verified identity tuple handed over by the auth layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// Stable identity reference from the auth provider.
    pub external_id: String,
    /// Asserted email address.
    pub email: Email,
    /// Asserted display name.
    pub name: String,
    /// Asserted role; used as the default on first contact only.
    pub role: Role,
}

impl VerifiedIdentity {
    /// Parse the identity headers, or `None` when any is missing or
    /// malformed.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let get = |name: &str| headers.get(name)?.to_str().ok().map(str::trim);

        let external_id = get(EXTERNAL_ID_HEADER)?;
        if external_id.is_empty() {
            return None;
        }
        let email = Email::parse(get(EMAIL_HEADER)?).ok()?;
        let name = get(NAME_HEADER)?;
        if name.is_empty() {
            return None;
        }
        let role: Role = get(ROLE_HEADER)?.parse().ok()?;

        Some(Self {
            external_id: external_id.to_owned(),
            email,
            name: name.to_owned(),
            role,
        })
    }
}

/// Extractor that requires an authenticated caller.
///
/// Resolves the identity headers and finds-or-creates the worker record.
/// The stored role is authoritative after first contact; changing it is
/// a manager operation, not a login side effect.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireAuth(worker): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", worker.name)
/// }
/// ```
pub struct RequireAuth(pub CurrentWorker);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = VerifiedIdentity::from_headers(&parts.headers).ok_or_else(|| {
            ApiError::NotAuthenticated("missing or malformed identity headers".to_owned())
        })?;

        let worker = WorkerRepository::new(state.pool())
            .find_or_create(
                &identity.external_id,
                &identity.email,
                &identity.name,
                identity.role,
            )
            .await?;

        Ok(Self(CurrentWorker::from(&worker)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(external_id: &str, email: &str, name: &str, role: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(EXTERNAL_ID_HEADER, HeaderValue::from_str(external_id).unwrap());
        map.insert(EMAIL_HEADER, HeaderValue::from_str(email).unwrap());
        map.insert(NAME_HEADER, HeaderValue::from_str(name).unwrap());
        map.insert(ROLE_HEADER, HeaderValue::from_str(role).unwrap());
        map
    }

    #[test]
    fn test_complete_headers_parse() {
        let map = headers("auth0|abc123", "asha@clinic.example.com", "Asha Rao", "CAREWORKER");
        let identity = VerifiedIdentity::from_headers(&map).unwrap();
        assert_eq!(identity.external_id, "auth0|abc123");
        assert_eq!(identity.name, "Asha Rao");
        assert_eq!(identity.role, Role::Careworker);
    }

    #[test]
    fn test_missing_header_rejects() {
        let mut map = headers("auth0|abc123", "asha@clinic.example.com", "Asha Rao", "MANAGER");
        map.remove(ROLE_HEADER);
        assert!(VerifiedIdentity::from_headers(&map).is_none());
    }

    #[test]
    fn test_malformed_values_reject() {
        let map = headers("auth0|abc123", "not-an-email", "Asha Rao", "CAREWORKER");
        assert!(VerifiedIdentity::from_headers(&map).is_none());

        let map = headers("auth0|abc123", "asha@clinic.example.com", "Asha Rao", "nurse");
        assert!(VerifiedIdentity::from_headers(&map).is_none());

        let map = headers("", "asha@clinic.example.com", "Asha Rao", "CAREWORKER");
        assert!(VerifiedIdentity::from_headers(&map).is_none());
    }
}
