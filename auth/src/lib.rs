//! Credential and token primitives
//!
//! I/O-free building blocks for the credential service:
//! - Password hashing (Argon2id)
//! - Signed token issuance and validation (HS256 compact tokens)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{ClaimSet, TokenCodec, TokenError};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = ClaimSet::issued_at("alice@example.com", 1_000, 2_000);
//! let token = codec.issue(&claims).unwrap();
//!
//! assert_eq!(codec.validate_at(&token, 1_500), Ok(claims));
//! assert_eq!(codec.validate_at(&token, 2_000), Err(TokenError::Expired));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, ClaimSet};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let claims = ClaimSet::for_subject("alice@example.com", Duration::hours(1));
//! let result = auth.authenticate("password123", &hash, claims).unwrap();
//!
//! // Validate token
//! let decoded = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.sub, "alice@example.com");
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::MAX_PASSWORD_BYTES;
pub use token::ClaimSet;
pub use token::TokenCodec;
pub use token::TokenError;
