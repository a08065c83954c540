use thiserror::Error;

/// Error type for password operations.
///
/// Verification has no error case: a mismatch or an unreadable stored hash
/// is simply `false`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
