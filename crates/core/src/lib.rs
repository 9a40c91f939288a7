//! Core business logic for the temple finance backend.
//!
//! This crate contains pure decision logic with ZERO web or database
//! dependencies.
//!
//! # Modules
//!
//! - `access` - Role registry, permission matrix and the authorization engine

pub mod access;
