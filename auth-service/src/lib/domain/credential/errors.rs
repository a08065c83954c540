use auth::AuthenticationError;
use auth::TokenError;
use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Password shape validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must not be empty")]
    Empty,

    #[error("Password too long: maximum {max} bytes, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for PersonName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Name must not be blank")]
    Blank,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all credential operations.
///
/// Token validation failures stay distinct here for logging and tests; the
/// HTTP layer collapses them into a single unauthorized response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid email: {0}")]
    InvalidIdentity(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    // Domain-level errors
    #[error("Identity already exists: {0}")]
    IdentityAlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token is malformed: {0}")]
    TokenMalformed(String),

    #[error("Unexpected signing method: {0}")]
    InvalidSigningMethod(String),

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is not valid yet")]
    NotYetValid,

    #[error("Token is expired")]
    TokenExpired,

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    HashingFailure(String),

    #[error("Token signing failed: {0}")]
    SigningFailure(String),

    #[error("Storage error: {0}")]
    StorageFailure(String),
}

impl CredentialError {
    /// Whether the error is one of the token validation failures.
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            CredentialError::TokenMalformed(_)
                | CredentialError::InvalidSigningMethod(_)
                | CredentialError::BadSignature
                | CredentialError::NotYetValid
                | CredentialError::TokenExpired
        )
    }
}

impl From<TokenError> for CredentialError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::SigningFailure(msg) => CredentialError::SigningFailure(msg),
            TokenError::Malformed(msg) => CredentialError::TokenMalformed(msg),
            TokenError::InvalidSigningMethod(alg) => CredentialError::InvalidSigningMethod(alg),
            TokenError::BadSignature => CredentialError::BadSignature,
            TokenError::NotYetValid => CredentialError::NotYetValid,
            TokenError::Expired => CredentialError::TokenExpired,
        }
    }
}

impl From<AuthenticationError> for CredentialError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => CredentialError::InvalidCredentials,
            AuthenticationError::Token(e) => CredentialError::from(e),
        }
    }
}

impl From<auth::PasswordError> for CredentialError {
    fn from(err: auth::PasswordError) -> Self {
        match err {
            auth::PasswordError::HashingFailed(msg) => CredentialError::HashingFailure(msg),
        }
    }
}
