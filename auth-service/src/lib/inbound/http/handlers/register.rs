use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::credential::errors::EmailError;
use crate::credential::errors::NameError;
use crate::credential::errors::PasswordPolicyError;
use crate::domain::credential::models::Credential;
use crate::domain::credential::models::EmailAddress;
use crate::domain::credential::models::Password;
use crate::domain::credential::models::PersonName;
use crate::domain::credential::models::RegisterCommand;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .credential_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref credential| ApiSuccess::new(StatusCode::CREATED, credential.into()))
}

/// HTTP request body for registering a credential (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),

    #[error("Invalid name: {0}")]
    Name(#[from] NameError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let identity = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        let first_name = PersonName::optional(self.first_name)?;
        let last_name = PersonName::optional(self.last_name)?;
        Ok(RegisterCommand::new(identity, password).with_names(first_name, last_name))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Credential> for RegisterResponseData {
    fn from(credential: &Credential) -> Self {
        Self {
            id: credential.id.to_string(),
            email: credential.identity.as_str().to_string(),
            first_name: credential.first_name.as_ref().map(ToString::to_string),
            last_name: credential.last_name.as_ref().map(ToString::to_string),
            created_at: credential.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            first_name: None,
            last_name: None,
        }
    }

    #[test]
    fn test_request_into_command() {
        let command = request(" Alice@Example.com", "pw1").try_into_command().unwrap();
        assert_eq!(command.identity.as_str(), "alice@example.com");
        assert_eq!(command.password.expose(), "pw1");
    }

    #[test]
    fn test_request_names() {
        let body = r#"{"email":"a@x.com","password":"pw1","first_name":" Ada ","last_name":"  "}"#;
        let command = serde_json::from_str::<RegisterRequest>(body)
            .unwrap()
            .try_into_command()
            .unwrap();
        assert_eq!(command.first_name.as_ref().map(PersonName::as_str), Some("Ada"));
        assert_eq!(command.last_name, None);

        let without_names: RegisterRequest =
            serde_json::from_str(r#"{"email":"a@x.com","password":"pw1"}"#).unwrap();
        let command = without_names.try_into_command().unwrap();
        assert_eq!(command.first_name, None);
        assert_eq!(command.last_name, None);

        let mut too_long = request("a@x.com", "pw1");
        too_long.last_name = Some("x".repeat(101));
        let err = too_long.try_into_command().unwrap_err();
        assert!(matches!(err, ParseRegisterRequestError::Name(_)));
        assert!(matches!(
            ApiError::from(err),
            ApiError::UnprocessableEntity(_)
        ));
    }

    #[test]
    fn test_invalid_request_is_unprocessable() {
        let err = request("not-an-email", "pw1").try_into_command().unwrap_err();
        assert!(matches!(
            ApiError::from(err),
            ApiError::UnprocessableEntity(_)
        ));

        let err = request("alice@example.com", "").try_into_command().unwrap_err();
        assert!(matches!(
            ApiError::from(err),
            ApiError::UnprocessableEntity(_)
        ));
    }

    #[test]
    fn test_response_data_omits_hash() {
        let credential = Credential::new(
            EmailAddress::new("alice@example.com".to_string()).unwrap(),
            "$argon2id$stored".to_string(),
        );

        let data = RegisterResponseData::from(&credential);
        let rendered = serde_json::to_string(&data).unwrap();

        assert_eq!(data.email, "alice@example.com");
        assert_eq!(data.first_name, None);
        assert_eq!(data.id, credential.id.to_string());
        assert!(!rendered.contains("argon2"));
    }
}
