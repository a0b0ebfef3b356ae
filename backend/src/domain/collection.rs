//! Typed decoding and encoding of collection records.
//!
//! Stores hand back raw JSON values; services turn them into domain records
//! here. Decoding is strict: one bad record fails the whole operation.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::error;

use crate::domain::Error;
use crate::domain::ports::{CollectionName, CollectionStoreError};

/// Decode every record of `collection` into `T`.
pub(crate) fn decode_records<T>(collection: &CollectionName, records: Vec<Value>) -> Result<Vec<T>, Error>
where
    T: DeserializeOwned,
{
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value(record).map_err(|err| {
                error!(%collection, index, error = %err, "stored record failed to decode");
                Error::internal(format!(
                    "record {index} of collection {collection} is malformed: {err}"
                ))
            })
        })
        .collect()
}

/// Encode `records` for a whole-collection save.
pub(crate) fn encode_records<T>(collection: &CollectionName, records: &[T]) -> Result<Vec<Value>, Error>
where
    T: Serialize,
{
    records
        .iter()
        .map(|record| {
            serde_json::to_value(record).map_err(|err| {
                Error::internal(format!(
                    "failed to encode a record of collection {collection}: {err}"
                ))
            })
        })
        .collect()
}

/// Storage failures are never the caller's fault.
pub(crate) fn map_store_error(err: CollectionStoreError) -> Error {
    error!(error = %err, "collection store failure");
    Error::internal(err.to_string())
}
