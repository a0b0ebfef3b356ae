//! Driving port for login, logout and bearer-token authentication.
//!
//! Inbound adapters call this port without knowing how sessions are stored,
//! so HTTP handler tests can substitute a double instead of wiring adapters.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, LoginSession, SessionToken, User};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Check credentials and open a session.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginSession, Error>;

    /// Close the session behind `token`, if any. Unknown tokens are ignored.
    async fn logout<'a>(&self, token: Option<&'a SessionToken>) -> Result<(), Error>;

    /// Resolve a presented bearer token to the calling user.
    async fn authenticate(&self, token: &SessionToken) -> Result<User, Error>;
}
