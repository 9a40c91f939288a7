//! Translation boundary from stored role strings to [`Role`].
//!
//! User records carry roles in several spellings (`"admin"`, `"Admin"`,
//! `"data-entry"`, `"Data Entry"`). Everything that reaches the engine goes
//! through [`normalize`] first.

use std::fmt;

use serde::{Serialize, Serializer};

use super::role::{Role, RoleLevel, UNKNOWN_ROLE_LEVEL};

/// Result of normalizing a raw role string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NormalizedRole {
    /// Resolved to a canonical role.
    Known(Role),
    /// Input passed through unchanged; denied by every permission check.
    Unrecognized(String),
    /// No role supplied (unauthenticated).
    Absent,
}

impl NormalizedRole {
    /// Returns the canonical role, if any.
    #[must_use]
    pub const fn role(&self) -> Option<Role> {
        match self {
            Self::Known(role) => Some(*role),
            Self::Unrecognized(_) | Self::Absent => None,
        }
    }

    /// Returns the hierarchy level, or [`UNKNOWN_ROLE_LEVEL`].
    #[must_use]
    pub const fn level(&self) -> RoleLevel {
        match self {
            Self::Known(role) => role.level(),
            Self::Unrecognized(_) | Self::Absent => UNKNOWN_ROLE_LEVEL,
        }
    }

    /// Display form: canonical name when known, raw input otherwise.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(role) => role.as_str(),
            Self::Unrecognized(raw) => raw,
            Self::Absent => "",
        }
    }
}

impl fmt::Display for NormalizedRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NormalizedRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Absent => serializer.serialize_none(),
            _ => serializer.serialize_str(self.as_str()),
        }
    }
}

/// Canonicalizes a raw role string.
///
/// Legacy slugs match case-insensitively; canonical display names match
/// exactly. Anything else passes through as [`NormalizedRole::Unrecognized`].
/// Never fails.
#[must_use]
pub fn normalize(raw: Option<&str>) -> NormalizedRole {
    let Some(raw) = raw else {
        return NormalizedRole::Absent;
    };

    Role::from_slug(raw)
        .or_else(|| Role::from_canonical(raw))
        .map_or_else(
            || NormalizedRole::Unrecognized(raw.to_string()),
            NormalizedRole::Known,
        )
}

/// Normalized role name for display next to a user.
#[must_use]
pub fn display_role(raw: Option<&str>) -> String {
    normalize(raw).to_string()
}
