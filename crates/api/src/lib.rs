//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for authentication and transactions
//! - Authentication middleware and extractors
//! - The token lifecycle service
//! - JSON error responses

pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;

#[cfg(test)]
mod test_support;

use std::iter::once;
use std::sync::Arc;

use axum::{Router, http::header::AUTHORIZATION};
use peachtree_db::Store;
use peachtree_shared::JwtService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use services::AuthService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Pooled store client.
    pub store: Store,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Token lifecycle operations.
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// Builds the state from a store and a configured JWT service.
    #[must_use]
    pub fn new(store: Store, jwt_service: JwtService) -> Self {
        let jwt_service = Arc::new(jwt_service);
        let auth_service = Arc::new(AuthService::new(store.clone(), Arc::clone(&jwt_service)));

        Self {
            store,
            jwt_service,
            auth_service,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes_with_state(state.clone()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(SetSensitiveRequestHeadersLayer::new(once(AUTHORIZATION)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
