//! User directory backed by the `users` collection.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::collection::{decode_records, map_store_error};
use crate::domain::ports::{CollectionName, CollectionStore, UserDirectory};
use crate::domain::{Error, LoginCredentials, User, UserId, UserRecord};

/// Read-only [`UserDirectory`] over a [`CollectionStore`].
#[derive(Clone)]
pub struct CollectionUserDirectory<S> {
    store: Arc<S>,
}

impl<S> CollectionUserDirectory<S> {
    /// Create a directory reading from `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S> CollectionUserDirectory<S>
where
    S: CollectionStore,
{
    async fn records(&self) -> Result<Vec<UserRecord>, Error> {
        let collection = CollectionName::users();
        let raw = self
            .store
            .load(&collection)
            .await
            .map_err(map_store_error)?;
        decode_records(&collection, raw)
    }
}

#[async_trait]
impl<S> UserDirectory for CollectionUserDirectory<S>
where
    S: CollectionStore,
{
    async fn list_all(&self) -> Result<Vec<User>, Error> {
        Ok(self.records().await?.iter().map(UserRecord::to_user).collect())
    }

    async fn find_by_credentials(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<User>, Error> {
        Ok(self
            .records()
            .await?
            .iter()
            .find(|record| record.matches_credentials(credentials.email(), credentials.password()))
            .map(UserRecord::to_user))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, Error> {
        Ok(self
            .records()
            .await?
            .iter()
            .find(|record| record.id() == id)
            .map(UserRecord::to_user))
    }
}
