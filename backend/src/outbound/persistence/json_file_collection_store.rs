//! Collection store persisting each collection as a JSON array file.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::ports::{CollectionName, CollectionStore, CollectionStoreError};

/// Stores `<name>.json` files inside one data directory.
///
/// Reads fail soft on missing or unparsable files. Writes go to a staging file
/// in the same directory which is then renamed over the target, so readers
/// see either the old or the new array.
#[derive(Debug, Clone)]
pub struct JsonFileCollectionStore {
    dir: Arc<Dir>,
    root: PathBuf,
}

impl JsonFileCollectionStore {
    /// Open `root`, creating it when it does not exist yet.
    ///
    /// # Examples
    /// ```no_run
    /// use ticketdesk::outbound::persistence::JsonFileCollectionStore;
    ///
    /// let store = JsonFileCollectionStore::open("data")?;
    /// assert!(store.root().ends_with("data"));
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn open(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref();
        Dir::create_ambient_dir_all(root, ambient_authority())?;
        let dir = Dir::open_ambient_dir(root, ambient_authority())?;
        Ok(Self {
            dir: Arc::new(dir),
            root: root.to_path_buf(),
        })
    }

    /// Directory holding the collection files.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn file_name(collection: &CollectionName) -> String {
    format!("{collection}.json")
}

fn read_collection(dir: &Dir, collection: &CollectionName) -> Result<Vec<Value>, CollectionStoreError> {
    let name = file_name(collection);
    let bytes = match dir.read(&name) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(%collection, "collection file missing; treating as empty");
            return Ok(Vec::new());
        }
        Err(err) => return Err(CollectionStoreError::read(collection.as_str(), err.to_string())),
    };
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Array(records)) => Ok(records),
        Ok(_) => {
            warn!(%collection, "collection file is not a JSON array; treating as empty");
            Ok(Vec::new())
        }
        Err(err) => {
            warn!(%collection, error = %err, "collection file is not valid JSON; treating as empty");
            Ok(Vec::new())
        }
    }
}

fn write_error(collection: &CollectionName, err: impl std::fmt::Display) -> CollectionStoreError {
    CollectionStoreError::write(collection.as_str(), err.to_string())
}

fn write_collection(
    dir: &Dir,
    collection: &CollectionName,
    records: Vec<Value>,
) -> Result<(), CollectionStoreError> {
    let mut bytes = serde_json::to_vec_pretty(&Value::Array(records))
        .map_err(|err| write_error(collection, err))?;
    bytes.push(b'\n');

    let staging = format!(".{collection}.{}.tmp", Uuid::new_v4().simple());
    dir.write(&staging, &bytes)
        .map_err(|err| write_error(collection, err))?;
    if let Err(err) = dir.rename(&staging, dir, file_name(collection)) {
        let _cleanup_result = dir.remove_file(&staging);
        return Err(write_error(collection, err));
    }
    Ok(())
}

#[async_trait]
impl CollectionStore for JsonFileCollectionStore {
    async fn load(&self, collection: &CollectionName) -> Result<Vec<Value>, CollectionStoreError> {
        let dir = Arc::clone(&self.dir);
        let target = collection.clone();
        tokio::task::spawn_blocking(move || read_collection(&dir, &target))
            .await
            .map_err(|err| CollectionStoreError::read(collection.as_str(), err.to_string()))?
    }

    async fn save(
        &self,
        collection: &CollectionName,
        records: Vec<Value>,
    ) -> Result<(), CollectionStoreError> {
        let dir = Arc::clone(&self.dir);
        let target = collection.clone();
        tokio::task::spawn_blocking(move || write_collection(&dir, &target, records))
            .await
            .map_err(|err| write_error(collection, err))?
    }
}
