//! Authentication middleware for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use peachtree_shared::{AppError, Claims, TokenScope};
use tracing::debug;

use crate::{AppState, error::ApiError};

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn bearer_from_headers(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)
        .ok_or_else(|| {
            ApiError(AppError::Unauthorized(
                "Authorization header with Bearer token is required".to_string(),
            ))
        })
}

/// Authentication middleware that validates access tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates signature, expiry and access scope
/// 3. Stores the claims in request extensions for handlers to access
///
/// Refresh tokens are rejected here; they only work on `/auth/refresh` and
/// `/auth/logout`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let claims = match bearer_from_headers(request.headers()) {
        Ok(token) => state.jwt_service.validate_scoped(token, TokenScope::Access),
        Err(rejection) => return rejection.into_response(),
    };

    match claims {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            debug!(error = %e, "Rejected access token");
            ApiError::from(e).into_response()
        }
    }
}

/// Extractor for authenticated user claims.
///
/// Only available behind [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the username the token was issued to.
    #[must_use]
    pub fn username(&self) -> &str {
        self.0.identity()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError(AppError::Unauthorized("Authentication required".to_string())))
    }
}

/// Raw bearer token, unvalidated.
///
/// Used by the refresh and logout endpoints, which must check the exact
/// token string against the store.
#[derive(Debug, Clone)]
pub struct RefreshBearer(pub String);

impl<S> FromRequestParts<S> for RefreshBearer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        bearer_from_headers(&parts.headers).map(|token| Self(token.to_string()))
    }
}
