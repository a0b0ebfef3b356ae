//! Driven port for the bearer-token session map.

use crate::domain::{SessionToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session registry adapters.
    pub enum SessionRegistryError {
        /// The registry state could not be accessed.
        Unavailable { message: String } => "session registry unavailable: {message}",
    }
}

/// Mapping from issued tokens to the users they authenticate.
///
/// Implementations are explicitly constructed and injected; tokens live until
/// revoked or until the registry is dropped.
#[cfg_attr(test, mockall::automock)]
pub trait SessionRegistry: Send + Sync {
    /// Issue a token that is unique for the registry's lifetime.
    fn issue(&self, user_id: &UserId) -> Result<SessionToken, SessionRegistryError>;

    /// Whether `token` is currently registered.
    fn is_valid(&self, token: &SessionToken) -> Result<bool, SessionRegistryError>;

    /// The user `token` was issued to, if it is registered.
    fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>, SessionRegistryError>;

    /// Forget `token`. Returns whether it was registered.
    fn revoke(&self, token: &SessionToken) -> Result<bool, SessionRegistryError>;
}
