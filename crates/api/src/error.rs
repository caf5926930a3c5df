//! JSON error responses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use peachtree_shared::AppError;
use serde_json::json;
use tracing::error;

/// Error returned by handlers and extractors.
///
/// Renders as `{"error": code, "message": text}`. Infrastructure failures are
/// logged with full detail and answered with a generic message.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl<E> From<E> for ApiError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl ApiError {
    /// Turns a malformed JSON body into a validation error.
    pub fn from_json_rejection(rejection: &JsonRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }

    /// Turns an unparseable path parameter into a validation error.
    pub fn from_path_rejection(rejection: &PathRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;

        if err.is_infrastructure() {
            error!(error = %err, code = err.error_code(), "Request failed");
        }

        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            Json(json!({
                "error": err.error_code(),
                "message": err.public_message(),
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use rstest::rstest;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = ApiError(err).into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[rstest]
    #[case(AppError::Validation("bad".into()), StatusCode::BAD_REQUEST, "VALIDATION_ERROR")]
    #[case(AppError::Unauthorized("no".into()), StatusCode::UNAUTHORIZED, "UNAUTHORIZED")]
    #[case(AppError::NotFound("gone".into()), StatusCode::NOT_FOUND, "NOT_FOUND")]
    #[case(AppError::Conflict("dup".into()), StatusCode::CONFLICT, "CONFLICT")]
    #[case(
        AppError::InsufficientFunds("Insufficient balance".into()),
        StatusCode::BAD_REQUEST,
        "INSUFFICIENT_FUNDS"
    )]
    #[case(
        AppError::Unavailable("timed out".into()),
        StatusCode::SERVICE_UNAVAILABLE,
        "SERVICE_UNAVAILABLE"
    )]
    #[tokio::test]
    async fn test_error_shape(
        #[case] err: AppError,
        #[case] status: StatusCode,
        #[case] code: &str,
    ) {
        let (actual, body) = render(err).await;
        assert_eq!(actual, status);
        assert_eq!(body["error"], code);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_infrastructure_detail_is_hidden() {
        let (status, body) = render(AppError::Database("relation missing".into())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["message"].as_str().unwrap().contains("relation"));
    }
}
