//! Temple finance API server.
//!
//! Main entry point for the backend service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use temple_api::{AppState, create_router};
use temple_core::access::{InMemoryUserRoles, PageGuard};
use temple_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "temple=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    // Create JWT service
    let jwt_config = JwtConfig {
        secret: config.jwt.secret.clone(),
        access_token_expires_secs: i64::try_from(config.jwt.access_token_expiry_secs)
            .context("jwt.access_token_expiry_secs is too large")?,
    };
    let jwt_service = JwtService::new(jwt_config);

    // Page guard rejects an unknown landing module at startup
    let page_guard = PageGuard::from_config(&config.access)
        .context("invalid access.landing_module")?;
    info!(
        landing = %page_guard.landing(),
        login_path = %config.access.login_path,
        "Page guard configured"
    );

    // Stored user roles, seeded from configuration
    let user_roles = InMemoryUserRoles::with_users(
        config
            .users
            .iter()
            .map(|user| (user.id.clone(), user.role.clone())),
    );
    info!(users = user_roles.len(), "User roles loaded");

    // Create application state
    let state = AppState {
        jwt_service: Arc::new(jwt_service),
        page_guard: Arc::new(page_guard),
        user_roles: Arc::new(user_roles),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
