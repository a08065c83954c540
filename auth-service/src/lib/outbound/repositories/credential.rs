use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::credential::models::Credential;
use crate::domain::credential::models::CredentialId;
use crate::domain::credential::models::EmailAddress;
use crate::domain::credential::models::PersonName;
use crate::domain::credential::ports::CredentialRepository;
use crate::credential::errors::CredentialError;

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

pub struct PostgresCredentialRepository {
    pool: PgPool,
}

impl PostgresCredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CredentialRow {
    id: Uuid,
    email: String,
    password_hash: String,
    first_name: Option<String>,
    last_name: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<CredentialRow> for Credential {
    type Error = CredentialError;

    fn try_from(row: CredentialRow) -> Result<Self, Self::Error> {
        Ok(Credential {
            id: CredentialId(row.id),
            identity: EmailAddress::new(row.email)?,
            secret_hash: row.password_hash,
            first_name: PersonName::optional(row.first_name)?,
            last_name: PersonName::optional(row.last_name)?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl CredentialRepository for PostgresCredentialRepository {
    async fn find_by_identity(
        &self,
        identity: &EmailAddress,
    ) -> Result<Option<Credential>, CredentialError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, email, password_hash, first_name, last_name, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(identity.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialError::StorageFailure(e.to_string()))?;

        row.map(Credential::try_from).transpose()
    }

    async fn create(&self, credential: Credential) -> Result<Credential, CredentialError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, first_name, last_name, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(credential.id.0)
        .bind(credential.identity.as_str())
        .bind(&credential.secret_hash)
        .bind(credential.first_name.as_ref().map(PersonName::as_str))
        .bind(credential.last_name.as_ref().map(PersonName::as_str))
        .bind(credential.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return CredentialError::IdentityAlreadyExists(
                        credential.identity.to_string(),
                    );
                }
            }
            CredentialError::StorageFailure(e.to_string())
        })?;

        Ok(credential)
    }
}
