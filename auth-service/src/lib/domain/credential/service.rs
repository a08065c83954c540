use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::AuthenticationResult;
use auth::Authenticator;
use auth::ClaimSet;
use auth::MAX_PASSWORD_BYTES;

use crate::credential::errors::CredentialError;
use crate::credential::ports::CredentialRepository;
use crate::credential::ports::CredentialServicePort;
use crate::credential::ports::TokenSettings;
use crate::domain::credential::models::Credential;
use crate::domain::credential::models::EmailAddress;
use crate::domain::credential::models::LoginOutcome;
use crate::domain::credential::models::Password;
use crate::domain::credential::models::RegisterCommand;

const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Checked against unknown identities so that their login costs one Argon2
/// verification, like a known identity with a wrong password.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-identities";

/// Used when the decoy cannot be hashed at startup. Same Argon2id parameters
/// as `argon2::Argon2::default()`, so verifying against it costs the same.
const FALLBACK_DECOY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$4RMrYqFIyWksZappFfa9BA$z6TnlRTJXzP9EyMWnv9DGmH3OLqoWPSh81nQAd/C18U";

/// Longest unverified token subject written to the log.
const MAX_LOGGED_SUBJECT_CHARS: usize = 64;

/// Domain service implementation for credential operations.
///
/// Concrete implementation of CredentialServicePort with dependency injection.
/// The signing secret is read once at construction and never changes.
pub struct CredentialService<CR>
where
    CR: CredentialRepository,
{
    repository: Arc<CR>,
    authenticator: Arc<Authenticator>,
    token_ttl: chrono::Duration,
    storage_timeout: Duration,
    decoy_hash: Arc<str>,
}

impl<CR> CredentialService<CR>
where
    CR: CredentialRepository,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential persistence implementation
    /// * `settings` - Signing secret and token lifetime
    ///
    /// # Returns
    /// Configured credential service instance
    pub fn new(repository: Arc<CR>, settings: &dyn TokenSettings) -> Self {
        let authenticator = Authenticator::new(settings.signing_secret().as_bytes());
        let decoy_hash = authenticator
            .hash_password(DECOY_PASSWORD)
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "Failed to hash decoy password, using fallback");
                FALLBACK_DECOY_HASH.to_string()
            });

        Self {
            repository,
            authenticator: Arc::new(authenticator),
            token_ttl: chrono::Duration::seconds(settings.token_ttl_seconds()),
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
            decoy_hash: Arc::from(decoy_hash),
        }
    }

    /// Bound every storage call by `timeout`.
    pub fn with_storage_timeout(mut self, timeout: Duration) -> Self {
        self.storage_timeout = timeout;
        self
    }

    async fn within_deadline<T, F>(&self, operation: &str, call: F) -> Result<T, CredentialError>
    where
        F: Future<Output = Result<T, CredentialError>>,
    {
        match tokio::time::timeout(self.storage_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(
                    operation = operation,
                    timeout_ms = self.storage_timeout.as_millis() as u64,
                    "Storage call timed out"
                );
                Err(CredentialError::StorageFailure(format!(
                    "{} timed out",
                    operation
                )))
            }
        }
    }

    async fn hash_password(&self, password: Password) -> Result<String, CredentialError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
            .await
            .map_err(|e| CredentialError::HashingFailure(e.to_string()))?
            .map_err(CredentialError::from)
    }

    async fn authenticate(
        &self,
        password: &str,
        stored_hash: Option<String>,
        claims: ClaimSet,
    ) -> Result<AuthenticationResult, CredentialError> {
        let authenticator = Arc::clone(&self.authenticator);
        let decoy_hash = Arc::clone(&self.decoy_hash);
        let password = password.to_string();

        tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => authenticator.authenticate(&password, &hash, claims),
            None => {
                let _ = authenticator.verify_password(&password, &decoy_hash);
                Err(AuthenticationError::InvalidCredentials)
            }
        })
        .await
        .map_err(|e| CredentialError::HashingFailure(e.to_string()))?
        .map_err(CredentialError::from)
    }
}

/// Bounded prefix of an unverified subject; logged with `?` so it is escaped.
fn loggable_subject(subject: &str) -> String {
    subject.chars().take(MAX_LOGGED_SUBJECT_CHARS).collect()
}

#[async_trait]
impl<CR> CredentialServicePort for CredentialService<CR>
where
    CR: CredentialRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Credential, CredentialError> {
        let RegisterCommand {
            identity,
            password,
            first_name,
            last_name,
        } = command;

        let existing = self
            .within_deadline(
                "find credential",
                self.repository.find_by_identity(&identity),
            )
            .await?;
        if existing.is_some() {
            tracing::info!(identity = %identity, "Registration rejected: identity already exists");
            return Err(CredentialError::IdentityAlreadyExists(identity.to_string()));
        }

        let secret_hash = self.hash_password(password).await?;

        let created = self
            .within_deadline(
                "create credential",
                self.repository.create(
                    Credential::new(identity, secret_hash).with_names(first_name, last_name),
                ),
            )
            .await?;

        tracing::info!(
            identity = %created.identity,
            credential_id = %created.id,
            "Credential registered"
        );

        Ok(created)
    }

    async fn login(
        &self,
        identity: &EmailAddress,
        password: &str,
    ) -> Result<LoginOutcome, CredentialError> {
        let credential = self
            .within_deadline("find credential", self.repository.find_by_identity(identity))
            .await?;

        let claims = ClaimSet::for_subject(identity.as_str(), self.token_ttl);

        // An oversized password cannot match any stored hash; it only pays
        // for the decoy check and never reaches Argon2 itself.
        let (candidate, stored_hash) = if password.len() > MAX_PASSWORD_BYTES {
            ("", None)
        } else {
            (password, credential.map(|c| c.secret_hash))
        };

        let result = self
            .authenticate(candidate, stored_hash, claims)
            .await
            .map_err(|e| {
                match &e {
                    CredentialError::InvalidCredentials => {
                        tracing::warn!(identity = %identity, "Login rejected")
                    }
                    other => tracing::error!(identity = %identity, error = %other, "Login failed"),
                }
                e
            })?;

        tracing::info!(
            identity = %identity,
            expires_at = result.claims.exp,
            "Login succeeded"
        );

        Ok(LoginOutcome {
            access_token: result.access_token,
            identity: identity.clone(),
            issued_at: result.claims.iat,
            expires_at: result.claims.exp,
        })
    }

    async fn verify_token(&self, token: &str) -> Result<ClaimSet, CredentialError> {
        self.authenticator.validate_token(token).map_err(|e| {
            let claimed_subject = self
                .authenticator
                .inspect_token(token)
                .ok()
                .map(|claims| loggable_subject(&claims.sub));
            tracing::warn!(reason = ?e, claimed_subject = ?claimed_subject, "Token rejected");
            CredentialError::from(e)
        })
    }
}
