//! Shared fixtures for handler and service tests.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::AUTHORIZATION, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use peachtree_db::{Store, connect, migration::Migrator, migration::MigratorTrait};
use peachtree_shared::{DatabaseConfig, JwtConfig, JwtService};
use serde_json::Value;
use tower::ServiceExt;

use crate::{AppState, create_router};

/// Migrated in-memory store with a single pooled connection.
pub async fn test_store() -> Store {
    let mut config = DatabaseConfig::new("sqlite::memory:");
    config.max_connections = 1;
    config.min_connections = 1;

    let store = connect(&config).await.expect("Failed to connect to database");
    Migrator::up(store.connection(), None)
        .await
        .expect("Failed to run migrations");
    store
}

pub fn test_jwt() -> JwtService {
    JwtService::new(&JwtConfig {
        secret: "test-secret-key-for-handler-tests".to_string(),
        ..JwtConfig::default()
    })
}

pub async fn test_app() -> (Router, AppState) {
    let state = AppState::new(test_store().await, test_jwt());
    (create_router(state.clone()), state)
}

/// Sends one request through the router and decodes the JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
