//! Password hashing with Argon2id.
//!
//! Hashes are stored in PHC string format, salt included, so a stored hash
//! is all that is needed to verify a later login attempt.

use argon2::{
    Argon2, PasswordHash,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Errors that can occur during password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Failed to hash password.
    #[error("failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password.
    #[error("failed to verify password: {0}")]
    VerifyError(String),

    /// Stored hash is not a valid PHC string.
    #[error("invalid password hash format")]
    InvalidHash,
}

/// Hashes a password using Argon2id with a fresh random salt.
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails.
///
/// # Example
///
/// ```
/// use peachtree_core::auth::hash_password;
///
/// let hash = hash_password("hunter2").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Verifies a plaintext password against a stored hash.
///
/// A mismatch is `Ok(false)`, not an error.
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` if the stored hash cannot be parsed.
/// Returns `PasswordError::VerifyError` if verification fails unexpectedly.
///
/// # Example
///
/// ```
/// use peachtree_core::auth::{hash_password, verify_password};
///
/// let hash = hash_password("hunter2").unwrap();
/// assert!(verify_password("hunter2", &hash).unwrap());
/// assert!(!verify_password("hunter3", &hash).unwrap());
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hash_is_phc_and_not_plaintext() {
        let hash = hash_password("peach-tree-42").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("peach-tree-42"));
    }

    #[test]
    fn test_verify_roundtrip() {
        let hash = hash_password("correct horse").unwrap();

        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("correct horsE", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let first = hash_password("same").unwrap();
        let second = hash_password("same").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_invalid_hash_format() {
        let result = verify_password("password", "not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::InvalidHash)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(12))]

        /// A password differing from the stored one by a single appended,
        /// removed or flipped character never verifies.
        #[test]
        fn prop_near_miss_never_verifies(
            password in "[a-zA-Z0-9]{2,16}",
            extra in proptest::char::range('!', '~'),
            flip_at in any::<proptest::sample::Index>(),
        ) {
            let hash = hash_password(&password).unwrap();

            let appended = format!("{password}{extra}");
            let truncated = &password[..password.len() - 1];
            let idx = flip_at.index(password.len());
            let mut flipped: Vec<char> = password.chars().collect();
            flipped[idx] = if flipped[idx] == 'x' { 'y' } else { 'x' };
            let flipped: String = flipped.into_iter().collect();

            prop_assert!(!verify_password(&appended, &hash).unwrap());
            prop_assert!(!verify_password(truncated, &hash).unwrap());
            if flipped != password {
                prop_assert!(!verify_password(&flipped, &hash).unwrap());
            }
        }
    }
}
