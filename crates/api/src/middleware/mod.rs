//! HTTP middleware stack for the shift-logging API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Auth extractor (per-handler, resolves the verified caller)

pub mod auth;

pub use auth::{RequireAuth, VerifiedIdentity};
