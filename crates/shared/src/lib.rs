//! Shared types, errors, and configuration for the temple finance backend.
//!
//! This crate provides common types used across all other crates:
//! - The access token payload contract (`Claims`)
//! - JWT issuing and decoding
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;


pub use self::auth::Claims;
pub use self::config::{AccessConfig, AppConfig, JwtSettings, ServerConfig, UserSeed};
pub use self::error::AppError;
pub use self::jwt::{JwtConfig, JwtError, JwtService};
