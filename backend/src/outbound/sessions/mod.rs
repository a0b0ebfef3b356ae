//! Session registry adapters.

mod in_memory_session_registry;

pub use in_memory_session_registry::InMemorySessionRegistry;
