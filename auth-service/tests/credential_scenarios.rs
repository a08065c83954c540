mod common;

use std::sync::Arc;

use auth::ClaimSet;
use auth_service::credential::errors::CredentialError;
use auth_service::credential::models::EmailAddress;
use auth_service::credential::models::Password;
use auth_service::credential::models::PersonName;
use auth_service::credential::models::RegisterCommand;
use auth_service::credential::ports::CredentialRepository;
use auth_service::credential::ports::CredentialServicePort;
use auth_service::credential::service::CredentialService;
use auth_service::repositories::InMemoryCredentialRepository;
use chrono::Utc;
use common::jwt_config;
use common::TEST_SECRET;

fn service() -> (
    CredentialService<InMemoryCredentialRepository>,
    Arc<InMemoryCredentialRepository>,
) {
    let repository = Arc::new(InMemoryCredentialRepository::new());
    let service = CredentialService::new(Arc::clone(&repository), &jwt_config());
    (service, repository)
}

fn email(raw: &str) -> EmailAddress {
    EmailAddress::new(raw.to_string()).unwrap()
}

fn register_command(identity: &str, password: &str) -> RegisterCommand {
    RegisterCommand::new(email(identity), Password::new(password.to_string()).unwrap())
}

#[tokio::test]
async fn test_second_registration_of_identity_is_rejected() {
    let (service, repository) = service();

    service
        .register(register_command("a@x.com", "pw1"))
        .await
        .expect("First registration failed");

    let second = service.register(register_command("a@x.com", "pw2")).await;

    assert_eq!(
        second,
        Err(CredentialError::IdentityAlreadyExists("a@x.com".to_string()))
    );
    assert_eq!(repository.len().await, 1);

    let stored = repository
        .find_by_identity(&email("a@x.com"))
        .await
        .unwrap()
        .unwrap();
    assert!(auth::PasswordHasher::new().verify("pw1", &stored.secret_hash));
    assert!(!auth::PasswordHasher::new().verify("pw2", &stored.secret_hash));
}

#[tokio::test]
async fn test_registered_names_are_stored() {
    let (service, repository) = service();

    let command = register_command("ada@x.com", "pw1").with_names(
        Some(PersonName::new("Ada".to_string()).unwrap()),
        Some(PersonName::new("Lovelace".to_string()).unwrap()),
    );
    service.register(command).await.expect("Registration failed");
    service
        .register(register_command("anon@x.com", "pw1"))
        .await
        .expect("Registration failed");

    let stored = repository
        .find_by_identity(&email("ada@x.com"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.first_name.as_ref().map(PersonName::as_str), Some("Ada"));
    assert_eq!(stored.last_name.as_ref().map(PersonName::as_str), Some("Lovelace"));

    let anonymous = repository
        .find_by_identity(&email("anon@x.com"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(anonymous.first_name, None);
    assert_eq!(anonymous.last_name, None);
}

#[tokio::test]
async fn test_concurrent_registrations_store_one_credential() {
    let (service, repository) = service();
    let service = Arc::new(service);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .register(register_command("race@x.com", &format!("pw{}", i)))
                    .await
            })
        })
        .collect();

    let mut succeeded = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(e) => assert!(matches!(e, CredentialError::IdentityAlreadyExists(_))),
        }
    }

    assert_eq!(succeeded, 1);
    assert_eq!(repository.len().await, 1);
}

#[tokio::test]
async fn test_login_after_registration_issues_token() {
    let (service, _repository) = service();

    service
        .register(register_command("b@x.com", "secret"))
        .await
        .expect("Registration failed");

    let outcome = service
        .login(&email("b@x.com"), "secret")
        .await
        .expect("Login failed");

    assert!(!outcome.access_token.is_empty());
    assert!(outcome.expires_at > outcome.issued_at);

    let claims = service.verify_token(&outcome.access_token).await.unwrap();
    assert_eq!(claims.sub, "b@x.com");
}

#[tokio::test]
async fn test_login_failures_are_the_same_error() {
    let (service, _repository) = service();

    service
        .register(register_command("b@x.com", "secret"))
        .await
        .expect("Registration failed");

    let wrong_password = service.login(&email("b@x.com"), "wrong").await;
    let unknown_identity = service.login(&email("unknown@x.com"), "anything").await;

    assert_eq!(wrong_password, Err(CredentialError::InvalidCredentials));
    assert_eq!(wrong_password, unknown_identity);
}

#[tokio::test]
async fn test_login_password_length_bound() {
    let (service, _repository) = service();
    let longest = "p".repeat(auth::MAX_PASSWORD_BYTES);

    service
        .register(register_command("c@x.com", &longest))
        .await
        .expect("Registration failed");

    assert!(service.login(&email("c@x.com"), &longest).await.is_ok());

    let oversized = format!("{}p", longest);
    assert_eq!(
        service.login(&email("c@x.com"), &oversized).await,
        Err(CredentialError::InvalidCredentials)
    );
}

#[tokio::test]
async fn test_expired_token_is_never_accepted() {
    let (service, _repository) = service();
    let now = Utc::now().timestamp();

    let token = auth::Authenticator::new(TEST_SECRET.as_bytes())
        .issue_token(&ClaimSet::issued_at("b@x.com", now - 60, now - 1))
        .unwrap();

    let result = service.verify_token(&token).await;

    assert_eq!(result, Err(CredentialError::TokenExpired));
    assert!(result.unwrap_err().is_token_rejection());
}
