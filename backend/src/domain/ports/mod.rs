//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod collection_store;
mod login_service;
mod session_registry;
mod tickets_command;
mod tickets_query;
mod user_directory;

#[cfg(test)]
pub use collection_store::MockCollectionStore;
pub use collection_store::{
    CollectionName, CollectionNameValidationError, CollectionStore, CollectionStoreError,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use session_registry::MockSessionRegistry;
pub use session_registry::{SessionRegistry, SessionRegistryError};
#[cfg(test)]
pub use tickets_command::MockTicketsCommand;
pub use tickets_command::TicketsCommand;
#[cfg(test)]
pub use tickets_query::MockTicketsQuery;
pub use tickets_query::TicketsQuery;
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::UserDirectory;
