use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::credential::errors::EmailError;
use crate::credential::errors::NameError;
use crate::credential::errors::PasswordPolicyError;

/// Stored credential.
///
/// Pairs an identity with the one-way hash of its password. The plaintext
/// never reaches this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub id: CredentialId,
    pub identity: EmailAddress,
    pub secret_hash: String,
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub created_at: DateTime<Utc>,
}

impl Credential {
    /// Create a credential for a freshly hashed password.
    pub fn new(identity: EmailAddress, secret_hash: String) -> Self {
        Self {
            id: CredentialId::new(),
            identity,
            secret_hash,
            first_name: None,
            last_name: None,
            created_at: Utc::now(),
        }
    }

    /// Attach the optional profile names.
    pub fn with_names(
        mut self,
        first_name: Option<PersonName>,
        last_name: Option<PersonName>,
    ) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }
}

/// Credential unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CredentialId(pub Uuid);

impl CredentialId {
    /// Generate a new random credential ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CredentialId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Addresses are
/// trimmed and lowercased so that one mailbox maps to one identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated, normalized EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_lowercase();
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// First or last name attached to a credential.
///
/// Informational only; never used for authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_CHARS: usize = 100;

    /// Create a new validated name.
    ///
    /// # Errors
    /// * `Blank` - Name is empty after trimming
    /// * `TooLong` - Name exceeds 100 characters
    pub fn new(name: String) -> Result<Self, NameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(NameError::Blank);
        }
        let actual = name.chars().count();
        if actual > Self::MAX_CHARS {
            return Err(NameError::TooLong {
                max: Self::MAX_CHARS,
                actual,
            });
        }
        Ok(Self(name.to_string()))
    }

    /// Parse an optional name, treating a missing or blank value as absent.
    pub fn optional(name: Option<String>) -> Result<Option<Self>, NameError> {
        match name {
            Some(name) if !name.trim().is_empty() => Self::new(name).map(Some),
            _ => Ok(None),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted for registration.
///
/// `Debug` is redacted so the value cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MAX_BYTES: usize = auth::MAX_PASSWORD_BYTES;

    /// Create a new password, checking its shape only.
    ///
    /// # Errors
    /// * `Empty` - Password is empty
    /// * `TooLong` - Password exceeds the hashing bound
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }
        if password.len() > Self::MAX_BYTES {
            return Err(PasswordPolicyError::TooLong {
                max: Self::MAX_BYTES,
                actual: password.len(),
            });
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to register a new credential with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub identity: EmailAddress,
    pub password: Password,
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
}

impl RegisterCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `identity` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(identity: EmailAddress, password: Password) -> Self {
        Self {
            identity,
            password,
            first_name: None,
            last_name: None,
        }
    }

    /// Attach the optional profile names.
    pub fn with_names(
        mut self,
        first_name: Option<PersonName>,
        last_name: Option<PersonName>,
    ) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }
}

/// Outcome of a successful login, ready to be serialized for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub access_token: String,
    pub identity: EmailAddress,
    pub issued_at: i64,
    pub expires_at: i64,
}
