//! Authentication primitives: login credentials and bearer session tokens.
//!
//! Inbound adapters parse raw strings into these types before talking to a
//! port, so the services only ever see validated values.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use zeroize::Zeroizing;

use super::User;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or empty.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was missing or empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is non-empty. It is kept verbatim, whitespace included, because
///   the directory matches it exactly.
/// - `password` is non-empty and retains caller-provided whitespace.
///
/// # Examples
/// ```
/// use ticketdesk::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("a@x.com", "p").unwrap();
/// assert_eq!(creds.email(), "a@x.com");
/// assert_eq!(creds.password(), "p");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        if email.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used as the login key.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Password as supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validation errors for [`SessionToken`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionTokenValidationError {
    /// Token was empty.
    #[error("session token must not be empty")]
    Empty,
    /// Token contained whitespace.
    #[error("session token must not contain whitespace")]
    ContainsWhitespace,
}

/// Opaque bearer credential handed out at login.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(String);

impl SessionToken {
    /// Parse a token presented by a client.
    pub fn new(raw: impl Into<String>) -> Result<Self, SessionTokenValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(SessionTokenValidationError::Empty);
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(SessionTokenValidationError::ContainsWhitespace);
        }
        Ok(Self(raw))
    }

    /// Generate a fresh unguessable token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Borrow the token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens are credentials; keep them out of logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

impl From<SessionToken> for String {
    fn from(value: SessionToken) -> Self {
        value.0
    }
}

impl TryFrom<String> for SessionToken {
    type Error = SessionTokenValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Successful login: the issued token and the caller's public profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginSession {
    /// Bearer token for subsequent requests.
    #[schema(value_type = String, example = "9b2f0c4e5d7a4f1e8c3b6a2d1e0f9a8b")]
    pub token: SessionToken,
    /// Authenticated user, without password.
    pub user: User,
}
