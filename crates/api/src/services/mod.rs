//! Application services orchestrating domain rules and the store.

pub mod auth;

pub use auth::AuthService;
