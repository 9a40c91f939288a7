//! User role management routes.

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    middleware::{self, Next},
    routing::put,
};
use serde::{Deserialize, Serialize};
use temple_core::access::{
    Action, Module, Role, RoleChangeDenial, authorize_role_change,
};
use temple_shared::AppError;
use tracing::info;

use crate::AppState;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::authorize::require_permission;

/// Creates user management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/{user_id}/role", put(change_role))
        .route_layer(middleware::from_fn(|request: Request, next: Next| {
            require_permission(Module::Users, Action::ManageRoles, request, next)
        }))
}

/// Role change request.
#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    /// Role to assign.
    pub role: String,
}

/// Applied role change.
#[derive(Debug, Serialize)]
pub struct ChangeRoleResponse {
    /// Target user.
    pub user_id: String,
    /// Role the target held before, as stored.
    pub previous_role: String,
    /// Canonical role now stored.
    pub role: Role,
}

/// PUT `/users/{user_id}/role` - Change a user's role.
///
/// The hierarchy check runs against the role stored for the target, not
/// anything the caller sends.
async fn change_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
    Json(payload): Json<ChangeRoleRequest>,
) -> Result<Json<ChangeRoleResponse>, ApiError> {
    let previous_role = state
        .user_roles
        .role_of(&user_id)
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} does not exist")))?;

    let role = authorize_role_change(
        Some(auth.role()),
        Some(previous_role.as_str()),
        &payload.role,
    )
    .map_err(|denial| {
        let message = denial.to_string();
        match denial {
            RoleChangeDenial::UnknownRole(_) => AppError::Validation(message),
            RoleChangeDenial::MissingPermission
            | RoleChangeDenial::TargetNotManageable
            | RoleChangeDenial::RoleNotAssignable => AppError::Forbidden(message),
        }
    })?;

    if !state.user_roles.set_role(&user_id, role) {
        return Err(AppError::NotFound(format!("User {user_id} does not exist")).into());
    }

    info!(
        actor = %auth.user_id(),
        target = %user_id,
        from = %previous_role,
        to = %role,
        "role changed"
    );

    Ok(Json(ChangeRoleResponse {
        user_id,
        previous_role,
        role,
    }))
}
