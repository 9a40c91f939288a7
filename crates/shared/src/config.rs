//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Page guard configuration.
    #[serde(default)]
    pub access: AccessConfig,
    /// Users known at startup, with their stored roles.
    #[serde(default)]
    pub users: Vec<UserSeed>,
}

/// A user record loaded from configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UserSeed {
    /// User ID as carried in tokens.
    pub id: String,
    /// Stored role, in any spelling the normalizer accepts.
    pub role: String,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    86400 // 1 day
}

/// Where the page guard sends users it turns away.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessConfig {
    /// Module name users are redirected to when a page is denied.
    #[serde(default = "default_landing_module")]
    pub landing_module: String,
    /// Path of the login page.
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            landing_module: default_landing_module(),
            login_path: default_login_path(),
        }
    }
}

fn default_landing_module() -> String {
    "dashboard".to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TEMPLE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
