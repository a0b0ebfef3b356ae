//! Driven port for whole-collection persistence.
//!
//! A collection is an ordered list of flat JSON records read and written as a
//! single unit. Adapters decide where the bytes live; services decode the
//! records into domain types.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;

/// Validation errors for [`CollectionName`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionNameValidationError {
    /// Name was empty.
    #[error("collection name must not be empty")]
    Empty,
    /// Name used characters outside `[a-z0-9_-]`.
    #[error("collection name '{0}' may only contain a-z, 0-9, '_' or '-'")]
    InvalidCharacters(String),
}

/// Name of a persisted collection, safe to use as a file stem.
///
/// # Examples
/// ```
/// use ticketdesk::domain::ports::CollectionName;
///
/// assert_eq!(CollectionName::tickets().as_str(), "tickets");
/// assert!(CollectionName::new("../etc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionName(String);

impl CollectionName {
    /// Validate and construct a collection name.
    pub fn new(name: impl Into<String>) -> Result<Self, CollectionNameValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(CollectionNameValidationError::Empty);
        }
        let valid = name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
        if !valid {
            return Err(CollectionNameValidationError::InvalidCharacters(name));
        }
        Ok(Self(name))
    }

    /// The `users` collection.
    pub fn users() -> Self {
        Self("users".to_owned())
    }

    /// The `tickets` collection.
    pub fn tickets() -> Self {
        Self("tickets".to_owned())
    }

    /// Borrow the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

define_port_error! {
    /// Errors raised by collection store adapters.
    pub enum CollectionStoreError {
        /// The backing resource exists but could not be read.
        Read { collection: String, message: String } =>
            "failed to read collection {collection}: {message}",
        /// Replacing the backing resource failed.
        Write { collection: String, message: String } =>
            "failed to write collection {collection}: {message}",
    }
}

/// Port for loading and replacing whole collections.
///
/// `load` fails soft: a missing or unparsable resource reads as an empty
/// collection. `save` replaces the previous contents entirely.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Read every record of `collection`, in storage order.
    async fn load(&self, collection: &CollectionName) -> Result<Vec<Value>, CollectionStoreError>;

    /// Replace the contents of `collection` with `records`.
    async fn save(
        &self,
        collection: &CollectionName,
        records: Vec<Value>,
    ) -> Result<(), CollectionStoreError>;
}
