//! Driven port for read-only user lookups.
//!
//! Users are provisioned out of band, so the directory never mutates. The
//! authentication service and the users listing both sit on top of it.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User, UserId};

/// Read-only access to provisioned users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Every user, in storage order, without passwords.
    async fn list_all(&self) -> Result<Vec<User>, Error>;

    /// The user whose email and password both match exactly.
    async fn find_by_credentials(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<User>, Error>;

    /// The user with identifier `id`.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, Error>;
}
