//! Stored user roles.
//!
//! Role changes are decided against the role the target holds in storage,
//! never against one reported by the caller.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::role::Role;

/// Lookup and update of the role stored for each user.
///
/// Stored roles are raw strings: legacy slugs and unrecognized values are
/// returned as written and normalized at decision time.
pub trait UserRoleStore: Send + Sync {
    /// Returns the stored role of `user_id`, or `None` if the user does not
    /// exist.
    fn role_of(&self, user_id: &str) -> Option<String>;

    /// Stores `role` for `user_id`. Returns `false` if the user does not
    /// exist.
    fn set_role(&self, user_id: &str, role: Role) -> bool;
}

/// Process-local [`UserRoleStore`].
#[derive(Debug, Default)]
pub struct InMemoryUserRoles {
    roles: RwLock<HashMap<String, String>>,
}

impl InMemoryUserRoles {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `(user_id, role)` pairs.
    pub fn with_users<I, K, V>(users: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            roles: RwLock::new(
                users
                    .into_iter()
                    .map(|(id, role)| (id.into(), role.into()))
                    .collect(),
            ),
        }
    }

    /// Number of known users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store has no users.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UserRoleStore for InMemoryUserRoles {
    fn role_of(&self, user_id: &str) -> Option<String> {
        self.roles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
            .cloned()
    }

    fn set_role(&self, user_id: &str, role: Role) -> bool {
        let mut roles = self.roles.write().unwrap_or_else(PoisonError::into_inner);
        match roles.get_mut(user_id) {
            Some(stored) => {
                *stored = role.as_str().to_string();
                true
            }
            None => false,
        }
    }
}
