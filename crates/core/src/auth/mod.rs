//! Authentication rules and password hashing.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - Credential presence checks shared by register and login

mod password;

pub use password::{PasswordError, hash_password, verify_password};

use peachtree_shared::AppError;

/// Maximum username length accepted by the credential store.
pub const MAX_USERNAME_LEN: usize = 150;

/// Checks that both credential fields are present.
///
/// # Errors
///
/// Returns `AppError::Validation` if either field is empty or the username
/// does not fit the store column.
pub fn validate_credentials(username: &str, password: &str) -> Result<(), AppError> {
    if username.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Username and password required".to_string(),
        ));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(AppError::Validation(format!(
            "Username must be at most {MAX_USERNAME_LEN} characters"
        )));
    }
    Ok(())
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "secret")]
    #[case("alice", "")]
    #[case("", "")]
    fn test_missing_credentials_rejected(#[case] username: &str, #[case] password: &str) {
        assert!(matches!(
            validate_credentials(username, password),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_overlong_username_rejected() {
        let username = "a".repeat(MAX_USERNAME_LEN + 1);
        assert!(validate_credentials(&username, "secret").is_err());
        assert!(validate_credentials(&"a".repeat(MAX_USERNAME_LEN), "secret").is_ok());
    }
}
