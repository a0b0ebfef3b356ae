//! Ticket desk backend library.
//!
//! Hexagonal layout: [`domain`] holds entities, services and ports,
//! [`inbound`] exposes them over HTTP and [`outbound`] implements the driven
//! ports against JSON files and process memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(test)]
mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
