//! Role registry: the closed set of roles and their hierarchy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::AccessError;

/// Hierarchy level of a role. Higher outranks lower.
pub type RoleLevel = i8;

/// Level reported for any role string that does not resolve to a [`Role`].
///
/// Strictly below [`Role::Viewer`], so an unrecognized role can never
/// manage anyone and is outranked by every real role.
pub const UNKNOWN_ROLE_LEVEL: RoleLevel = -1;

/// Authorization tier assigned to a user.
///
/// Variants are declared lowest first so the derived `Ord` agrees with
/// [`Role::level`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Read-only access to basic information.
    #[serde(rename = "Viewer")]
    Viewer = 0,
    /// Adds income and expense records.
    #[serde(rename = "Data Entry")]
    DataEntry = 1,
    /// Views data and produces financial reports.
    #[serde(rename = "Accountant")]
    Accountant = 2,
    /// Manages income, expenses, events and inventory.
    #[serde(rename = "Manager")]
    Manager = 3,
    /// Everything except role management.
    #[serde(rename = "Admin")]
    Admin = 4,
    /// Full system access.
    #[serde(rename = "Super Admin")]
    SuperAdmin = 5,
}

impl Role {
    /// Every role, highest level first.
    pub const ALL: [Self; 6] = [
        Self::SuperAdmin,
        Self::Admin,
        Self::Manager,
        Self::Accountant,
        Self::DataEntry,
        Self::Viewer,
    ];

    /// Returns the hierarchy level of this role.
    #[must_use]
    pub const fn level(self) -> RoleLevel {
        self as RoleLevel
    }

    /// Canonical display name, as stored for newly created users.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super Admin",
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::Accountant => "Accountant",
            Self::DataEntry => "Data Entry",
            Self::Viewer => "Viewer",
        }
    }

    /// Legacy lowercase spelling still found in older user records.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::SuperAdmin => "super-admin",
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Accountant => "accountant",
            Self::DataEntry => "data-entry",
            Self::Viewer => "viewer",
        }
    }

    /// Human readable summary shown next to the role in user management.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::SuperAdmin => {
                "Full system access including user management and system settings"
            }
            Self::Admin => "Full access to all modules except user role management",
            Self::Manager => "Can manage income, expenses, events, and view reports",
            Self::Accountant => "Can view all data and generate financial reports",
            Self::DataEntry => {
                "Can add income and expense records and view basic information"
            }
            Self::Viewer => "Read-only access to basic information",
        }
    }

    /// Looks up a role by its exact canonical display name.
    #[must_use]
    pub fn from_canonical(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == name)
    }

    /// Looks up a role by its legacy slug, ignoring ASCII case.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.slug().eq_ignore_ascii_case(slug))
    }
}

/// Returns the hierarchy level of a role.
#[must_use]
pub const fn level_of(role: Role) -> RoleLevel {
    role.level()
}

/// Returns every role, highest level first.
#[must_use]
pub const fn all_roles() -> [Role; 6] {
    Role::ALL
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AccessError;

    /// Strict parse: canonical names only. Use
    /// [`normalize`](super::normalize::normalize) for stored role strings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_canonical(s).ok_or_else(|| AccessError::UnknownRole(s.to_string()))
    }
}
