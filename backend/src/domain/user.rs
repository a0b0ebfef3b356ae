//! User data model.
//!
//! Users are provisioned by editing the `users` collection directly. The API
//! only reads them, and only ever hands out the password-free [`User`]
//! projection.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

/// Validation errors for user identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifier was empty or whitespace only.
    #[error("user id must not be empty")]
    EmptyId,
    /// Identifier carried leading or trailing whitespace.
    #[error("user id must not contain surrounding whitespace")]
    SurroundingWhitespace,
}

/// Stable user identifier as stored in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::SurroundingWhitespace);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Public view of a user. Never carries the password.
///
/// # Examples
/// ```
/// use ticketdesk::domain::{User, UserId};
///
/// let user = User::new(UserId::new("1").unwrap(), "Ada", "a@x.com", "admin");
/// let json = serde_json::to_value(&user).unwrap();
/// assert!(json.get("password").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = String, example = "1")]
    id: UserId,
    #[schema(example = "Ada Lovelace")]
    name: String,
    #[schema(example = "ada@example.com")]
    email: String,
    #[schema(example = "admin")]
    role: String,
}

impl User {
    /// Build a user view from its parts.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role: role.into(),
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Login and assignment key.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Free-form role label. Not enforced anywhere.
    pub fn role(&self) -> &str {
        &self.role
    }
}

/// User as persisted in the `users` collection, password included.
///
/// ## Invariants
/// - `password` is plain text and compared verbatim; it never leaves the
///   domain except through [`UserRecord::matches_credentials`].
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    id: UserId,
    #[serde(default)]
    name: String,
    email: String,
    password: Zeroizing<String>,
    #[serde(default)]
    role: String,
}

impl UserRecord {
    /// Build a stored record, mainly for seeding collections in tests.
    pub fn new(user: User, password: impl Into<String>) -> Self {
        let User {
            id,
            name,
            email,
            role,
        } = user;
        Self {
            id,
            name,
            email,
            password: Zeroizing::new(password.into()),
            role,
        }
    }

    /// Identifier of the stored user.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Exact match on both email and password.
    pub fn matches_credentials(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password.as_str() == password
    }

    /// Password-free projection.
    pub fn to_user(&self) -> User {
        User::new(
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.role.clone(),
        )
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish_non_exhaustive()
    }
}
