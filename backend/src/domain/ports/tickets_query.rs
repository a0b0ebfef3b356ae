//! Driving port for ticket reads.

use async_trait::async_trait;

use crate::domain::{Error, Ticket, TicketId};

/// Domain use-case port for reading tickets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketsQuery: Send + Sync {
    /// All tickets in storage order.
    async fn list_tickets(&self) -> Result<Vec<Ticket>, Error>;

    /// A single ticket, or a `not_found` error.
    async fn get_ticket(&self, id: &TicketId) -> Result<Ticket, Error>;
}
