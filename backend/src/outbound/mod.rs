//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: collection stores backed by JSON files or memory
//! - **sessions**: the in-memory bearer-token registry
//!
//! Adapters are thin translators between domain types and storage. They
//! contain no business logic.

pub mod persistence;
pub mod sessions;
