//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CARELOG_DATABASE_URL` - `PostgreSQL` connection string (falls back
//!   to `DATABASE_URL`)
//!
//! ## Optional
//! - `CARELOG_HOST` - Bind address (default: 127.0.0.1)
//! - `CARELOG_PORT` - Listen port (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - e.g., "development", "staging", "production"
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0 to 1.0 (default: 1.0)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = database_url_from(
            get_optional_env("CARELOG_DATABASE_URL"),
            get_optional_env("DATABASE_URL"),
        )?;
        let host = parse_host(&get_env_or_default("CARELOG_HOST", "127.0.0.1"))?;
        let port = parse_port(&get_env_or_default("CARELOG_PORT", "3000"))?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            database_url,
            host,
            port,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Pick the database URL: `CARELOG_DATABASE_URL` wins, falling back to
/// the generic `DATABASE_URL` (set by managed-Postgres attach).
fn database_url_from(
    primary: Option<String>,
    fallback: Option<String>,
) -> Result<SecretString, ConfigError> {
    primary
        .or(fallback)
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingEnvVar("CARELOG_DATABASE_URL".to_string()))
}

/// Parse the bind address.
fn parse_host(value: &str) -> Result<IpAddr, ConfigError> {
    value
        .parse::<IpAddr>()
        .map_err(|e| ConfigError::InvalidEnvVar("CARELOG_HOST".to_string(), e.to_string()))
}

/// Parse the listen port.
fn parse_port(value: &str) -> Result<u16, ConfigError> {
    value
        .parse::<u16>()
        .map_err(|e| ConfigError::InvalidEnvVar("CARELOG_PORT".to_string(), e.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_database_url_prefers_primary() {
        let url = database_url_from(
            Some("postgres://primary/carelog".to_owned()),
            Some("postgres://fallback/carelog".to_owned()),
        )
        .unwrap();
        assert_eq!(url.expose_secret(), "postgres://primary/carelog");
    }

    #[test]
    fn test_database_url_falls_back() {
        let url = database_url_from(None, Some("postgres://fallback/carelog".to_owned())).unwrap();
        assert_eq!(url.expose_secret(), "postgres://fallback/carelog");
    }

    #[test]
    fn test_database_url_missing_fails_fast() {
        let err = database_url_from(None, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "CARELOG_DATABASE_URL"));
    }

    #[test]
    fn test_parse_host() {
        assert_eq!(parse_host("127.0.0.1").unwrap(), IpAddr::from([127, 0, 0, 1]));
        assert_eq!(parse_host("::1").unwrap(), "::1".parse::<IpAddr>().unwrap());

        let err = parse_host("not-an-address").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "CARELOG_HOST"));
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("3000").unwrap(), 3000);

        for bad in ["0x1f90", "99999", "-1", ""] {
            let err = parse_port(bad).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "CARELOG_PORT"),
                "{bad}"
            );
        }
    }
}
