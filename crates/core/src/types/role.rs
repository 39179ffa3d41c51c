//! Worker role with different permission levels.

use serde::{Deserialize, Serialize};

/// Error returned when parsing a [`Role`] from a string.
#[derive(thiserror::Error, Debug, Clone)]
#[error("invalid role: {0} (expected CAREWORKER or MANAGER)")]
pub struct RoleParseError(pub String);

/// Worker role.
///
/// Careworkers clock their own shifts; managers additionally see
/// system-wide activity, dashboard statistics, and can change roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
// Stored as TEXT with a CHECK constraint, not a Postgres enum type
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Clocks own shifts, sees own history only.
    Careworker,
    /// Everything a careworker can do, plus system-wide views and
    /// administrative actions.
    Manager,
}

impl Role {
    /// Whether this role grants manager-level access.
    #[must_use]
    pub const fn is_manager(self) -> bool {
        matches!(self, Self::Manager)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Careworker => write!(f, "CAREWORKER"),
            Self::Manager => write!(f, "MANAGER"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CAREWORKER" => Ok(Self::Careworker),
            "MANAGER" => Ok(Self::Manager),
            _ => Err(RoleParseError(s.to_owned())),
        }
    }
}
