//! CareLog Core - Shared types library.
//!
//! This crate provides common types used across all CareLog components:
//! - `api` - Shift-logging HTTP service
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows
//! it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, roles, and coordinates
//! - [`geo`] - Great-circle distance math for geofence admission

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod geo;
pub mod types;

pub use types::*;
