//! The authorization engine.
//!
//! Every page guard, API guard and conditional render asks these functions,
//! passing the raw role from the caller's token. Nothing here holds state.

use serde::Serialize;
use thiserror::Error;

use super::matrix::{Action, Module, PermissionMatrix, allowed_roles};
use super::normalize::{NormalizedRole, normalize};
use super::role::{Role, RoleLevel};

/// Returns true if `raw_role` may perform `action` on `module`.
///
/// Absent and unrecognized roles are denied everything, as are actions the
/// module does not define.
#[must_use]
pub fn is_allowed(raw_role: Option<&str>, module: Module, action: Action) -> bool {
    normalize(raw_role)
        .role()
        .is_some_and(|role| role_allowed(role, module, action))
}

/// Matrix lookup for an already normalized role.
#[must_use]
pub fn role_allowed(role: Role, module: Module, action: Action) -> bool {
    allowed_roles(module, action).contains(&role)
}

/// String-keyed variant of [`is_allowed`] for names arriving from URLs or
/// query strings. Unknown module or action names are a denial.
#[must_use]
pub fn is_allowed_by_name(raw_role: Option<&str>, module: &str, action: &str) -> bool {
    match (module.parse::<Module>(), action.parse::<Action>()) {
        (Ok(module), Ok(action)) => is_allowed(raw_role, module, action),
        _ => false,
    }
}

/// Page-level check used by route guards.
#[must_use]
pub fn has_page_access(raw_role: Option<&str>, module: Module) -> bool {
    is_allowed(raw_role, module, Action::View)
}

/// Modules the role can open, in menu order.
#[must_use]
pub fn accessible_modules(raw_role: Option<&str>) -> Vec<Module> {
    let Some(role) = normalize(raw_role).role() else {
        return Vec::new();
    };

    Module::ALL
        .into_iter()
        .filter(|module| role_allowed(role, *module, Action::View))
        .collect()
}

/// Actions the role may perform on a module, in [`Action::ALL`] order.
#[must_use]
pub fn allowed_actions(raw_role: Option<&str>, module: Module) -> Vec<Action> {
    let Some(role) = normalize(raw_role).role() else {
        return Vec::new();
    };

    PermissionMatrix::defined_actions(module)
        .into_iter()
        .filter(|action| role_allowed(role, module, *action))
        .collect()
}

/// Hierarchy level of a raw role; unrecognized roles get
/// [`UNKNOWN_ROLE_LEVEL`](super::role::UNKNOWN_ROLE_LEVEL).
#[must_use]
pub fn role_level(raw_role: Option<&str>) -> RoleLevel {
    normalize(raw_role).level()
}

/// Returns true if `current` strictly outranks `target`.
///
/// Peers cannot manage each other and nobody manages themselves.
#[must_use]
pub fn can_manage(current: Option<&str>, target: Option<&str>) -> bool {
    role_level(current) > role_level(target)
}

/// Roles `current` may grant, highest first. Always strictly below its own
/// level.
#[must_use]
pub fn assignable_roles(current: Option<&str>) -> Vec<Role> {
    let level = role_level(current);
    Role::ALL
        .into_iter()
        .filter(|role| role.level() < level)
        .collect()
}

/// Why a role change was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleChangeDenial {
    /// Caller lacks `users.manage_roles`.
    #[error("You do not have permission to manage user roles")]
    MissingPermission,

    /// Target user's current role is not strictly below the caller's.
    #[error("You cannot manage users with equal or higher roles")]
    TargetNotManageable,

    /// Requested role does not resolve to a known role.
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Requested role is not strictly below the caller's.
    #[error("You cannot assign roles equal to or higher than your own")]
    RoleNotAssignable,
}

/// Decides whether `current` may change a user holding `target_current`
/// to `new_role`.
///
/// Checks run in order: matrix permission, hierarchy against the target's
/// present role, validity of the new role, then hierarchy against the new
/// role.
pub fn authorize_role_change(
    current: Option<&str>,
    target_current: Option<&str>,
    new_role: &str,
) -> Result<Role, RoleChangeDenial> {
    if !is_allowed(current, Module::Users, Action::ManageRoles) {
        return Err(RoleChangeDenial::MissingPermission);
    }
    if !can_manage(current, target_current) {
        return Err(RoleChangeDenial::TargetNotManageable);
    }

    let Some(new) = normalize(Some(new_role)).role() else {
        return Err(RoleChangeDenial::UnknownRole(new_role.to_string()));
    };
    if new.level() >= role_level(current) {
        return Err(RoleChangeDenial::RoleNotAssignable);
    }

    Ok(new)
}

/// Actions granted on one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleAccess {
    /// The module.
    pub module: Module,
    /// Granted actions.
    pub actions: Vec<Action>,
}

/// Everything a client needs to render menus and action controls for a
/// role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessSummary {
    /// Normalized role; raw input if unrecognized, `null` if absent.
    pub role: NormalizedRole,
    /// Hierarchy level.
    pub level: RoleLevel,
    /// Pages the role can open, in menu order.
    pub modules: Vec<Module>,
    /// Granted actions per module, for every module with at least one.
    pub permissions: Vec<ModuleAccess>,
    /// Roles this role may grant.
    pub assignable_roles: Vec<Role>,
}

impl AccessSummary {
    /// Builds the summary for a raw role.
    #[must_use]
    pub fn for_role(raw_role: Option<&str>) -> Self {
        let permissions = Module::ALL
            .into_iter()
            .map(|module| ModuleAccess {
                module,
                actions: allowed_actions(raw_role, module),
            })
            .filter(|access| !access.actions.is_empty())
            .collect();

        Self {
            role: normalize(raw_role),
            level: role_level(raw_role),
            modules: accessible_modules(raw_role),
            permissions,
            assignable_roles: assignable_roles(raw_role),
        }
    }
}
