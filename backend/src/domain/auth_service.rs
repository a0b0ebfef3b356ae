//! Authentication service implementing the [`LoginService`] driving port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::domain::ports::{LoginService, SessionRegistry, SessionRegistryError, UserDirectory};
use crate::domain::{Error, LoginCredentials, LoginSession, SessionToken, User};

/// Login and bearer-token checks over a user directory and a session registry.
#[derive(Clone)]
pub struct AuthService<D, R> {
    directory: Arc<D>,
    sessions: Arc<R>,
}

impl<D, R> AuthService<D, R> {
    /// Create a new service with the given collaborators.
    pub fn new(directory: Arc<D>, sessions: Arc<R>) -> Self {
        Self {
            directory,
            sessions,
        }
    }
}

fn map_registry_error(err: SessionRegistryError) -> Error {
    error!(error = %err, "session registry failure");
    Error::internal(err.to_string())
}

#[async_trait]
impl<D, R> LoginService for AuthService<D, R>
where
    D: UserDirectory,
    R: SessionRegistry,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginSession, Error> {
        let Some(user) = self.directory.find_by_credentials(credentials).await? else {
            info!("login rejected");
            return Err(Error::unauthorized("Invalid credentials"));
        };
        let token = self.sessions.issue(user.id()).map_err(map_registry_error)?;
        info!(user_id = %user.id(), "session opened");
        Ok(LoginSession { token, user })
    }

    async fn logout<'a>(&self, token: Option<&'a SessionToken>) -> Result<(), Error> {
        let Some(token) = token else {
            return Ok(());
        };
        let revoked = self.sessions.revoke(token).map_err(map_registry_error)?;
        debug!(revoked, "logout");
        Ok(())
    }

    async fn authenticate(&self, token: &SessionToken) -> Result<User, Error> {
        let Some(user_id) = self.sessions.resolve(token).map_err(map_registry_error)? else {
            return Err(Error::unauthorized("Invalid or expired token"));
        };
        match self.directory.find_by_id(&user_id).await? {
            Some(user) => Ok(user),
            None => {
                debug!(%user_id, "token refers to a removed user");
                Err(Error::unauthorized("User not found"))
            }
        }
    }
}
