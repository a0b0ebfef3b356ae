//! Collection store adapters.
//!
//! - [`JsonFileCollectionStore`] keeps each collection in `<name>.json` under a
//!   data directory and is what the server runs with.
//! - [`InMemoryCollectionStore`] keeps collections in process memory for tests
//!   and throwaway runs.
//!
//! Both are thin translators: they move ordered JSON records in and out of
//! storage and leave decoding to the domain.

mod in_memory_collection_store;
mod json_file_collection_store;

pub use in_memory_collection_store::InMemoryCollectionStore;
pub use json_file_collection_store::JsonFileCollectionStore;
