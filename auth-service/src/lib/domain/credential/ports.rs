use async_trait::async_trait;
use auth::ClaimSet;

use crate::domain::credential::models::Credential;
use crate::domain::credential::models::EmailAddress;
use crate::domain::credential::models::LoginOutcome;
use crate::domain::credential::models::RegisterCommand;
use crate::credential::errors::CredentialError;

/// Port for credential domain service operations.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register a new credential.
    ///
    /// # Arguments
    /// * `command` - Validated command containing identity and password
    ///
    /// # Returns
    /// Stored credential
    ///
    /// # Errors
    /// * `IdentityAlreadyExists` - Identity is already registered
    /// * `HashingFailure` - Password hashing failed
    /// * `StorageFailure` - Storage operation failed or timed out
    async fn register(&self, command: RegisterCommand) -> Result<Credential, CredentialError>;

    /// Check a password and issue an access token.
    ///
    /// # Arguments
    /// * `identity` - Identity to log in as
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Access token with its identity and expiry
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown identity or wrong password (not distinguished)
    /// * `SigningFailure` - Token signing failed
    /// * `StorageFailure` - Storage operation failed or timed out
    async fn login(
        &self,
        identity: &EmailAddress,
        password: &str,
    ) -> Result<LoginOutcome, CredentialError>;

    /// Validate an access token.
    ///
    /// # Returns
    /// Claims the token was issued with
    ///
    /// # Errors
    /// * `TokenMalformed`, `InvalidSigningMethod`, `BadSignature`,
    ///   `NotYetValid`, `TokenExpired` - Token rejected
    async fn verify_token(&self, token: &str) -> Result<ClaimSet, CredentialError>;
}

/// Persistence operations for credentials.
#[async_trait]
pub trait CredentialRepository: Send + Sync + 'static {
    /// Retrieve a credential by identity.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `StorageFailure` - Storage operation failed
    async fn find_by_identity(
        &self,
        identity: &EmailAddress,
    ) -> Result<Option<Credential>, CredentialError>;

    /// Persist a new credential.
    ///
    /// Implementations enforce identity uniqueness themselves so that
    /// concurrent registrations cannot both succeed.
    ///
    /// # Errors
    /// * `IdentityAlreadyExists` - Identity is already stored
    /// * `StorageFailure` - Storage operation failed
    async fn create(&self, credential: Credential) -> Result<Credential, CredentialError>;
}

/// Token settings supplied by configuration.
pub trait TokenSettings: Send + Sync {
    /// Shared secret used to sign and verify tokens.
    fn signing_secret(&self) -> &str;

    /// Lifetime of issued tokens, in seconds.
    fn token_ttl_seconds(&self) -> i64;
}
