//! Authorization guards for API requests.
//!
//! Both guards run after [`auth_middleware`](super::auth::auth_middleware)
//! and ask the authorization engine; neither keeps its own rules.
//!
//! This crate serves no module CRUD routes itself, so [`guard_request`] is
//! not mounted by [`create_router`](crate::create_router). It is the layer
//! for module routers (income, expense, events, ...) nested under the API
//! prefix, where the first path segment names the module:
//!
//! ```ignore
//! let income = Router::new()
//!     .route("/income", get(list).post(create))
//!     .route("/income/{id}", put(update).delete(remove))
//!     .layer(middleware::from_fn(guard_request))
//!     .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));
//! ```

use axum::{extract::Request, middleware::Next, response::IntoResponse, response::Response};
use temple_core::access::{Action, Module, is_allowed};
use temple_shared::{AppError, Claims};
use tracing::{debug, warn};

use crate::error::ApiError;

/// Rejects the request unless the caller may perform `action` on `module`.
///
/// Use for endpoints whose action is not implied by the HTTP verb, such as
/// report exports or role management:
///
/// ```ignore
/// Router::new()
///     .route("/reports/audit", get(audit))
///     .route_layer(middleware::from_fn(|req: Request, next: Next| {
///         require_permission(Module::Reports, Action::Audit, req, next)
///     }))
/// ```
pub async fn require_permission(
    module: Module,
    action: Action,
    request: Request,
    next: Next,
) -> Response {
    match check(&request, module, action) {
        Ok(()) => next.run(request).await,
        Err(err) => err.into_response(),
    }
}

/// Derives module and action from the request and rejects it unless the
/// caller is allowed.
///
/// The module is the first path segment (relative to where the router is
/// nested) and the action comes from the HTTP verb: GET/HEAD view,
/// POST create, PUT/PATCH edit, DELETE delete. Anything else is denied.
pub async fn guard_request(request: Request, next: Next) -> Response {
    let module = request
        .uri()
        .path()
        .trim_start_matches('/')
        .split('/')
        .next()
        .and_then(|segment| segment.parse::<Module>().ok());
    let action = Action::for_method(request.method().as_str());

    let (Some(module), Some(action)) = (module, action) else {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "request does not map to a module action"
        );
        return ApiError(AppError::Forbidden(
            "You do not have permission to perform this action".to_string(),
        ))
        .into_response();
    };

    match check(&request, module, action) {
        Ok(()) => next.run(request).await,
        Err(err) => err.into_response(),
    }
}

fn check(request: &Request, module: Module, action: Action) -> Result<(), ApiError> {
    let Some(claims) = request.extensions().get::<Claims>() else {
        return Err(ApiError(AppError::Unauthorized(
            "Authentication required".to_string(),
        )));
    };

    if is_allowed(Some(claims.role()), module, action) {
        debug!(
            role = %claims.role,
            %module,
            %action,
            "permission granted"
        );
        Ok(())
    } else {
        warn!(
            user_id = %claims.id,
            role = %claims.role,
            %module,
            %action,
            method = %request.method(),
            path = %request.uri().path(),
            "permission denied"
        );
        Err(ApiError(AppError::Forbidden(format!(
            "You do not have permission to {action} {module}"
        ))))
    }
}
