//! Authentication routes for register, login, token refresh and logout.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post},
};
use peachtree_shared::{AccessTokenResponse, LoginRequest, MessageResponse, RegisterRequest};

use crate::{
    AppState,
    error::ApiError,
    middleware::{AuthUser, RefreshBearer},
};

/// Creates the public auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
}

/// Creates the auth routes that require an access token.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/delete", delete(delete_account))
}

/// POST /auth/register - Register a new user.
async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::from_json_rejection(&e))?;

    state
        .auth_service
        .register(&payload.username, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// POST /auth/login - Authenticate user and return tokens.
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::from_json_rejection(&e))?;

    let tokens = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(tokens))
}

/// POST /auth/refresh - Mint a new access token from a refresh token.
async fn refresh(
    State(state): State<AppState>,
    RefreshBearer(token): RefreshBearer,
) -> Result<impl IntoResponse, ApiError> {
    let access_token = state.auth_service.refresh(&token).await?;

    Ok(Json(AccessTokenResponse { access_token }))
}

/// POST /auth/logout - Revoke a refresh token.
async fn logout(
    State(state): State<AppState>,
    RefreshBearer(token): RefreshBearer,
) -> Result<impl IntoResponse, ApiError> {
    state.auth_service.logout(&token).await?;

    Ok(Json(MessageResponse::new("Successfully logged out")))
}

/// DELETE /auth/delete - Delete the caller's account.
async fn delete_account(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    state.auth_service.delete_account(user.username()).await?;

    Ok(Json(MessageResponse::new("User deleted successfully")))
}
