//! Process-local collection store for tests and ephemeral runs.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::{CollectionName, CollectionStore, CollectionStoreError};

/// Keeps every collection in a map; nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryCollectionStore {
    collections: RwLock<HashMap<CollectionName, Vec<Value>>>,
}

impl InMemoryCollectionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `collection` with `records`, replacing any previous contents.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use ticketdesk::domain::ports::CollectionName;
    /// use ticketdesk::outbound::persistence::InMemoryCollectionStore;
    ///
    /// let store = InMemoryCollectionStore::new()
    ///     .with_collection(CollectionName::users(), vec![json!({"id": "1"})]);
    /// # let _ = store;
    /// ```
    pub fn with_collection(self, collection: CollectionName, records: Vec<Value>) -> Self {
        {
            let mut collections = match self.collections.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            collections.insert(collection, records);
        }
        self
    }
}

#[async_trait]
impl CollectionStore for InMemoryCollectionStore {
    async fn load(&self, collection: &CollectionName) -> Result<Vec<Value>, CollectionStoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|err| CollectionStoreError::read(collection.as_str(), err.to_string()))?;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn save(
        &self,
        collection: &CollectionName,
        records: Vec<Value>,
    ) -> Result<(), CollectionStoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|err| CollectionStoreError::write(collection.as_str(), err.to_string()))?;
        collections.insert(collection.clone(), records);
        Ok(())
    }
}
