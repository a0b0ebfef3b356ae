//! Session registry holding tokens in process memory.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::domain::ports::{SessionRegistry, SessionRegistryError};
use crate::domain::{SessionToken, UserId};

/// Token map guarded by a read-write lock. Tokens never expire on their own.
///
/// # Examples
/// ```
/// use ticketdesk::domain::UserId;
/// use ticketdesk::domain::ports::SessionRegistry;
/// use ticketdesk::outbound::sessions::InMemorySessionRegistry;
///
/// let registry = InMemorySessionRegistry::new();
/// let user = UserId::new("1").unwrap();
/// let token = registry.issue(&user).unwrap();
/// assert_eq!(registry.resolve(&token).unwrap(), Some(user));
/// ```
#[derive(Debug, Default)]
pub struct InMemorySessionRegistry {
    sessions: RwLock<HashMap<SessionToken, UserId>>,
}

impl InMemorySessionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(err: PoisonError<T>) -> SessionRegistryError {
    SessionRegistryError::unavailable(err.to_string())
}

impl SessionRegistry for InMemorySessionRegistry {
    fn issue(&self, user_id: &UserId) -> Result<SessionToken, SessionRegistryError> {
        let mut sessions = self.sessions.write().map_err(poisoned)?;
        let token = loop {
            let candidate = SessionToken::generate();
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };
        sessions.insert(token.clone(), user_id.clone());
        debug!(%user_id, active = sessions.len(), "session issued");
        Ok(token)
    }

    fn is_valid(&self, token: &SessionToken) -> Result<bool, SessionRegistryError> {
        Ok(self.sessions.read().map_err(poisoned)?.contains_key(token))
    }

    fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>, SessionRegistryError> {
        Ok(self.sessions.read().map_err(poisoned)?.get(token).cloned())
    }

    fn revoke(&self, token: &SessionToken) -> Result<bool, SessionRegistryError> {
        Ok(self.sessions.write().map_err(poisoned)?.remove(token).is_some())
    }
}
