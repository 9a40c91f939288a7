//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides the enforcement points for the authorization engine:
//! - Bearer token authentication middleware
//! - Per-route and per-request permission guards
//! - Access introspection routes for the UI
//! - Role changes checked against stored user roles

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use temple_core::access::{PageGuard, UserRoleStore};
use temple_shared::JwtService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Page guard used to answer navigation checks.
    pub page_guard: Arc<PageGuard>,
    /// Stored user roles consulted by role changes.
    pub user_roles: Arc<dyn UserRoleStore>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
