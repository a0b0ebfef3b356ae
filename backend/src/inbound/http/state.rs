//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, TicketsCommand, TicketsQuery, UserDirectory};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UserDirectory>,
    pub tickets: Arc<dyn TicketsCommand>,
    pub tickets_query: Arc<dyn TicketsQuery>,
}

impl HttpState {
    /// Bundle the ports used by the HTTP handlers.
    pub fn new(
        login: Arc<dyn LoginService>,
        users: Arc<dyn UserDirectory>,
        tickets: Arc<dyn TicketsCommand>,
        tickets_query: Arc<dyn TicketsQuery>,
    ) -> Self {
        Self {
            login,
            users,
            tickets,
            tickets_query,
        }
    }
}
