use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::credential::models::Credential;
use crate::domain::credential::models::EmailAddress;
use crate::domain::credential::ports::CredentialRepository;
use crate::credential::errors::CredentialError;

/// Process-local credential store.
///
/// Same uniqueness semantics as the PostgreSQL adapter; contents are lost on
/// restart.
#[derive(Default)]
pub struct InMemoryCredentialRepository {
    credentials: RwLock<HashMap<EmailAddress, Credential>>,
}

impl InMemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored credentials.
    pub async fn len(&self) -> usize {
        self.credentials.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.credentials.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn find_by_identity(
        &self,
        identity: &EmailAddress,
    ) -> Result<Option<Credential>, CredentialError> {
        Ok(self.credentials.read().await.get(identity).cloned())
    }

    async fn create(&self, credential: Credential) -> Result<Credential, CredentialError> {
        let mut credentials = self.credentials.write().await;

        if credentials.contains_key(&credential.identity) {
            return Err(CredentialError::IdentityAlreadyExists(
                credential.identity.to_string(),
            ));
        }

        credentials.insert(credential.identity.clone(), credential.clone());
        Ok(credential)
    }
}
