use rstest::rstest;

use crate::AppError;

#[rstest]
#[case(AppError::Validation("test".into()), 400, "VALIDATION_ERROR")]
#[case(AppError::Unauthorized("test".into()), 401, "UNAUTHORIZED")]
#[case(AppError::NotFound("test".into()), 404, "NOT_FOUND")]
#[case(AppError::Conflict("test".into()), 409, "CONFLICT")]
#[case(AppError::InsufficientFunds("test".into()), 400, "INSUFFICIENT_FUNDS")]
#[case(AppError::InvariantViolation("test".into()), 500, "INVARIANT_VIOLATION")]
#[case(AppError::Unavailable("test".into()), 503, "SERVICE_UNAVAILABLE")]
#[case(AppError::Database("test".into()), 500, "DATABASE_ERROR")]
#[case(AppError::Internal("test".into()), 500, "INTERNAL_ERROR")]
fn test_app_error_mapping(#[case] error: AppError, #[case] status: u16, #[case] code: &str) {
    assert_eq!(error.status_code(), status);
    assert_eq!(error.error_code(), code);
}

#[test]
fn test_app_error_display() {
    assert_eq!(
        AppError::Unauthorized("msg".into()).to_string(),
        "Authentication failed: msg"
    );
    assert_eq!(
        AppError::InsufficientFunds("msg".into()).to_string(),
        "Insufficient funds: msg"
    );
    assert_eq!(
        AppError::Unavailable("msg".into()).to_string(),
        "Service unavailable: msg"
    );
}

#[test]
fn test_infrastructure_detail_is_hidden() {
    let err = AppError::Database("connection refused at 10.0.0.3:5432".into());
    assert!(err.is_infrastructure());
    assert!(!err.public_message().contains("10.0.0.3"));

    let err = AppError::InvariantViolation("status 'sent' missing".into());
    assert!(err.is_infrastructure());
    assert_eq!(err.public_message(), "An internal error occurred");
}

#[test]
fn test_business_errors_keep_message() {
    let err = AppError::InsufficientFunds("Insufficient balance".into());
    assert!(!err.is_infrastructure());
    assert_eq!(err.public_message(), "Insufficient balance");

    let err = AppError::Conflict("User already exists".into());
    assert_eq!(err.public_message(), "User already exists");
}
