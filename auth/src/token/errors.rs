use thiserror::Error;

/// Error type for token operations.
///
/// Validation failures are kept distinct here so they can be logged and
/// tested; callers facing the outside world should collapse them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailure(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Unexpected signing method: {0}")]
    InvalidSigningMethod(String),

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is not valid yet")]
    NotYetValid,

    #[error("Token is expired")]
    Expired,
}
