//! Integration test helpers for CareLog.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p carelog-cli -- migrate
//!
//! # Start the API
//! cargo run -p carelog-api
//!
//! # Run the (ignored-by-default) integration tests
//! cargo test -p carelog-integration-tests -- --ignored
//! ```
//!
//! The tests talk to a running service over HTTP and inject the identity
//! headers a fronting auth proxy would set.

use reqwest::header::{HeaderMap, HeaderValue};

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("CARELOG_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A synthetic authenticated caller.
#[derive(Debug, Clone)]
pub struct TestWorker {
    pub external_id: String,
    pub email: String,
    pub name: String,
    pub role: &'static str,
}

impl TestWorker {
    /// A fresh careworker with a unique external ID.
    #[must_use]
    pub fn careworker() -> Self {
        let tag = uuid::Uuid::new_v4();
        Self {
            external_id: format!("test|{tag}"),
            email: format!("worker-{tag}@clinic.example.com"),
            name: "Test Careworker".to_string(),
            role: "CAREWORKER",
        }
    }

    /// A fresh manager with a unique external ID.
    #[must_use]
    pub fn manager() -> Self {
        let tag = uuid::Uuid::new_v4();
        Self {
            external_id: format!("test|{tag}"),
            email: format!("manager-{tag}@clinic.example.com"),
            name: "Test Manager".to_string(),
            role: "MANAGER",
        }
    }

    /// Identity headers for this caller, as the auth proxy would set them.
    ///
    /// # Panics
    ///
    /// Panics if a generated value is not a valid header value (test bug).
    #[must_use]
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            "x-auth-external-id",
            HeaderValue::from_str(&self.external_id).expect("valid header"),
        );
        map.insert(
            "x-auth-email",
            HeaderValue::from_str(&self.email).expect("valid header"),
        );
        map.insert(
            "x-auth-name",
            HeaderValue::from_str(&self.name).expect("valid header"),
        );
        map.insert("x-auth-role", HeaderValue::from_static(self.role));
        map
    }
}

/// An HTTP client with no identity headers.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn anonymous_client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// An HTTP client that sends `worker`'s identity headers on every request.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client_for(worker: &TestWorker) -> reqwest::Client {
    reqwest::Client::builder()
        .default_headers(worker.headers())
        .build()
        .expect("Failed to create HTTP client")
}
