//! Core types for CareLog.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod coordinates;
pub mod email;
pub mod id;
pub mod role;

pub use coordinates::{Coordinates, CoordinatesError};
pub use email::{Email, EmailError};
pub use id::*;
pub use role::{Role, RoleParseError};
