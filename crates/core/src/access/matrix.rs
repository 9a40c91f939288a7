//! The permission matrix: which roles may perform which action on which
//! module.
//!
//! The table is a `match` over closed enums, so it exists at compile time,
//! is shared by every caller, and adding a module or action is a change the
//! compiler makes visible here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::AccessError;
use super::role::Role;

/// Functional area of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Module {
    /// Summary cards and charts.
    Dashboard,
    /// Donations.
    Income,
    /// Expenses.
    Expense,
    /// Event budgets.
    Events,
    /// Inventory items.
    Inventory,
    /// Donor and vendor contacts.
    AddressBook,
    /// P&L and audit reports.
    Reports,
    /// User and role administration.
    Users,
}

impl Module {
    /// Every module in menu order.
    pub const ALL: [Self; 8] = [
        Self::Dashboard,
        Self::Income,
        Self::Expense,
        Self::Events,
        Self::Inventory,
        Self::AddressBook,
        Self::Reports,
        Self::Users,
    ];

    /// Returns the module name as used in URLs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Events => "events",
            Self::Inventory => "inventory",
            Self::AddressBook => "address-book",
            Self::Reports => "reports",
            Self::Users => "users",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|module| module.as_str() == s)
            .ok_or_else(|| AccessError::UnknownModule(s.to_string()))
    }
}

/// Operation within a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Open the page or read records.
    View,
    /// Add records.
    Create,
    /// Modify records.
    Edit,
    /// Remove records.
    Delete,
    /// Download PDF/CSV.
    Export,
    /// Change another user's role.
    ManageRoles,
    /// Financial reports.
    Financial,
    /// Audit reports.
    Audit,
}

impl Action {
    /// Every action.
    pub const ALL: [Self; 8] = [
        Self::View,
        Self::Create,
        Self::Edit,
        Self::Delete,
        Self::Export,
        Self::ManageRoles,
        Self::Financial,
        Self::Audit,
    ];

    /// Returns the action name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Export => "export",
            Self::ManageRoles => "manage_roles",
            Self::Financial => "financial",
            Self::Audit => "audit",
        }
    }

    /// Default action for an HTTP method.
    ///
    /// Returns `None` for methods that have no matching action; callers
    /// treat that as a denial. Report endpoints pick `Export`, `Financial`
    /// or `Audit` explicitly instead.
    #[must_use]
    pub fn for_method(method: &str) -> Option<Self> {
        match method.to_ascii_uppercase().as_str() {
            "GET" | "HEAD" => Some(Self::View),
            "POST" => Some(Self::Create),
            "PUT" | "PATCH" => Some(Self::Edit),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| AccessError::UnknownAction(s.to_string()))
    }
}

use Role::{Accountant, Admin, DataEntry, Manager, SuperAdmin, Viewer};

const EVERYONE: &[Role] = &[SuperAdmin, Admin, Manager, Accountant, DataEntry, Viewer];
const BOOKKEEPERS: &[Role] = &[SuperAdmin, Admin, Manager, Accountant];
const STAFF: &[Role] = &[SuperAdmin, Admin, Manager, Accountant, DataEntry];
const RECORDERS: &[Role] = &[SuperAdmin, Admin, Manager, DataEntry];
const MANAGERS: &[Role] = &[SuperAdmin, Admin, Manager];
const ADMINS: &[Role] = &[SuperAdmin, Admin];
const SUPER_ADMIN: &[Role] = &[SuperAdmin];
const NOBODY: &[Role] = &[];

/// Roles allowed to perform `action` on `module`, highest first.
///
/// An empty slice means the action is not defined for the module.
#[must_use]
pub const fn allowed_roles(module: Module, action: Action) -> &'static [Role] {
    use Action::{Audit, Create, Delete, Edit, Export, Financial, ManageRoles, View};

    match (module, action) {
        (Module::Dashboard, View) => EVERYONE,
        (Module::Dashboard, Export) => BOOKKEEPERS,

        (Module::Income | Module::Expense, View) => EVERYONE,
        (Module::Income | Module::Expense, Create) => RECORDERS,
        (Module::Income | Module::Expense, Edit) => MANAGERS,
        (Module::Income | Module::Expense, Delete) => ADMINS,
        (Module::Income | Module::Expense, Export) => BOOKKEEPERS,

        (Module::Events, View) => EVERYONE,
        (Module::Events, Create | Edit | Export) => MANAGERS,
        (Module::Events, Delete) => ADMINS,

        // Viewer sees inventory while Accountant and Data Entry do not.
        (Module::Inventory, View) => &[SuperAdmin, Admin, Manager, Viewer],
        (Module::Inventory, Create | Edit | Export) => MANAGERS,
        (Module::Inventory, Delete) => ADMINS,

        (Module::Reports, View | Export | Financial) => BOOKKEEPERS,
        (Module::Reports, Audit) => ADMINS,

        (Module::AddressBook, View) => STAFF,
        (Module::AddressBook, Create) => RECORDERS,
        (Module::AddressBook, Edit) => MANAGERS,
        (Module::AddressBook, Delete) => ADMINS,

        (Module::Users, View) => ADMINS,
        (Module::Users, Create | Edit | Delete | ManageRoles) => SUPER_ADMIN,

        _ => NOBODY,
    }
}

/// One cell of the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermissionEntry {
    /// Module the entry applies to.
    pub module: Module,
    /// Action within the module.
    pub action: Action,
    /// Roles allowed, highest first.
    pub roles: &'static [Role],
}

impl PermissionEntry {
    /// Returns true if `role` is listed.
    #[must_use]
    pub fn allows(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Read-only view over the permission matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionMatrix;

impl PermissionMatrix {
    /// Returns the entry for a module/action pair, if the action is defined.
    #[must_use]
    pub const fn entry(module: Module, action: Action) -> Option<PermissionEntry> {
        let roles = allowed_roles(module, action);
        if roles.is_empty() {
            None
        } else {
            Some(PermissionEntry {
                module,
                action,
                roles,
            })
        }
    }

    /// Actions defined for a module, in [`Action::ALL`] order.
    #[must_use]
    pub fn defined_actions(module: Module) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|action| !allowed_roles(module, *action).is_empty())
            .collect()
    }

    /// Every defined entry, module-major in menu order.
    pub fn entries() -> impl Iterator<Item = PermissionEntry> {
        Module::ALL.into_iter().flat_map(|module| {
            Action::ALL
                .into_iter()
                .filter_map(move |action| Self::entry(module, action))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("dashboard", Module::Dashboard)]
    #[case("address-book", Module::AddressBook)]
    #[case("users", Module::Users)]
    fn test_module_from_str(#[case] name: &str, #[case] expected: Module) {
        assert_eq!(name.parse::<Module>(), Ok(expected));
        assert_eq!(expected.to_string(), name);
    }

    #[rstest]
    #[case("")]
    #[case("Dashboard")]
    #[case("address_book")]
    #[case("roles")]
    fn test_module_from_str_rejects(#[case] name: &str) {
        assert_eq!(
            name.parse::<Module>(),
            Err(AccessError::UnknownModule(name.to_string()))
        );
    }

    #[test]
    fn test_action_names() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>(), Ok(action));
        }
        assert_eq!(
            "manage-roles".parse::<Action>(),
            Err(AccessError::UnknownAction("manage-roles".into()))
        );
    }

    #[test]
    fn test_serde_names_match_url_names() {
        assert_eq!(
            serde_json::to_value(Module::AddressBook).unwrap(),
            serde_json::json!("address-book")
        );
        assert_eq!(
            serde_json::to_value(Action::ManageRoles).unwrap(),
            serde_json::json!("manage_roles")
        );
    }

    #[rstest]
    #[case("GET", Some(Action::View))]
    #[case("get", Some(Action::View))]
    #[case("HEAD", Some(Action::View))]
    #[case("POST", Some(Action::Create))]
    #[case("PUT", Some(Action::Edit))]
    #[case("PATCH", Some(Action::Edit))]
    #[case("DELETE", Some(Action::Delete))]
    #[case("OPTIONS", None)]
    #[case("TRACE", None)]
    fn test_action_for_method(#[case] method: &str, #[case] expected: Option<Action>) {
        assert_eq!(Action::for_method(method), expected);
    }

    #[test]
    fn test_defined_actions() {
        assert_eq!(
            PermissionMatrix::defined_actions(Module::Dashboard),
            vec![Action::View, Action::Export]
        );
        assert_eq!(
            PermissionMatrix::defined_actions(Module::Reports),
            vec![Action::View, Action::Export, Action::Financial, Action::Audit]
        );
        assert_eq!(
            PermissionMatrix::defined_actions(Module::AddressBook),
            vec![Action::View, Action::Create, Action::Edit, Action::Delete]
        );
        assert_eq!(
            PermissionMatrix::defined_actions(Module::Users),
            vec![
                Action::View,
                Action::Create,
                Action::Edit,
                Action::Delete,
                Action::ManageRoles
            ]
        );
    }

    #[test]
    fn test_entry_count() {
        // dashboard 2, income 5, expense 5, events 5, inventory 5,
        // address-book 4, reports 4, users 5
        assert_eq!(PermissionMatrix::entries().count(), 35);
    }

    #[test]
    fn test_undefined_entry_is_none() {
        assert!(PermissionMatrix::entry(Module::Dashboard, Action::Create).is_none());
        assert!(PermissionMatrix::entry(Module::Income, Action::Audit).is_none());
        assert!(PermissionMatrix::entry(Module::AddressBook, Action::Export).is_none());
    }

    #[test]
    fn test_role_sets_have_no_duplicates() {
        for entry in PermissionMatrix::entries() {
            let mut roles = entry.roles.to_vec();
            roles.sort();
            roles.dedup();
            assert_eq!(roles.len(), entry.roles.len(), "{entry:?}");
        }
    }
}
