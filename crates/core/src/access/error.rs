//! Errors raised at the string parsing boundary of the access module.
//!
//! Authorization decisions never fail; only turning untrusted names into
//! the closed `Module`/`Action`/`Role` enums can.

use thiserror::Error;

/// Errors from parsing access-control names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Name does not match any module.
    #[error("unknown module: {0}")]
    UnknownModule(String),

    /// Name does not match any action.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// Name does not match any canonical role.
    #[error("unknown role: {0}")]
    UnknownRole(String),
}
