//! Access token payload contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JWT claims carried by every access token.
///
/// The authorization engine only ever reads `role`; the remaining fields
/// belong to the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Opaque user identifier.
    pub id: String,
    /// Role as persisted for the user. May be a legacy spelling.
    pub role: String,
    /// User email.
    pub email: String,
    /// Expiration timestamp (unix seconds).
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(id: &str, role: &str, email: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            role: role.to_string(),
            email: email.to_string(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.id
    }

    /// Returns the raw role string from claims.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Returns true if the token is expired at `now` (unix seconds).
    #[must_use]
    pub const fn is_expired_at(&self, now: i64) -> bool {
        self.exp < now
    }
}
