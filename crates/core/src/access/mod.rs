//! Role-based access control.
//!
//! This module is the single source of truth for who may do what:
//!
//! - `role` - Role registry and hierarchy levels
//! - `normalize` - Raw role string to canonical role
//! - `matrix` - Module/action permission matrix
//! - `engine` - Decision functions built on the matrix and hierarchy
//! - `guard` - Page guard decisions for navigation
//! - `directory` - Stored user roles consulted by role changes
//! - `error` - Parsing errors for module, action and role names

pub mod directory;
pub mod engine;
pub mod error;
pub mod guard;
pub mod matrix;
pub mod normalize;
pub mod role;

#[cfg(test)]
mod engine_props;

pub use directory::{InMemoryUserRoles, UserRoleStore};
pub use engine::{
    AccessSummary, ModuleAccess, RoleChangeDenial, accessible_modules, allowed_actions,
    assignable_roles, authorize_role_change, can_manage, has_page_access, is_allowed,
    is_allowed_by_name, role_allowed, role_level,
};
pub use error::AccessError;
pub use guard::{PageDecision, PageGuard, PageTarget, page_target};
pub use matrix::{Action, Module, PermissionEntry, PermissionMatrix, allowed_roles};
pub use normalize::{NormalizedRole, display_role, normalize};
pub use role::{Role, RoleLevel, UNKNOWN_ROLE_LEVEL, all_roles, level_of};
