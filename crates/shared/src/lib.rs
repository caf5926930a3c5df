//! Shared types, errors, and configuration for Peachtree.
//!
//! This crate provides common pieces used across all other crates:
//! - Application-wide error taxonomy with HTTP mapping
//! - Configuration management
//! - JWT claims and the token signing service
//! - Request/response payloads for the auth surface

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;

#[cfg(test)]
mod error_tests;

pub use auth::{
    AccessTokenResponse, Claims, LoginRequest, MessageResponse, RegisterRequest, TokenPair,
    TokenScope,
};
pub use config::{AppConfig, DatabaseConfig, JwtConfig};
pub use error::{AppError, AppResult};
pub use jwt::{JwtError, JwtService};
