//! Driving port for ticket mutations.

use async_trait::async_trait;

use crate::domain::{Error, NewTicket, Ticket, TicketId, TicketPatch};

/// Domain use-case port for creating, updating and deleting tickets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketsCommand: Send + Sync {
    /// Persist a new ticket and return it.
    async fn create_ticket(&self, draft: NewTicket) -> Result<Ticket, Error>;

    /// Apply `patch` to an existing ticket and return the result.
    async fn update_ticket(&self, id: &TicketId, patch: TicketPatch) -> Result<Ticket, Error>;

    /// Remove a ticket.
    async fn delete_ticket(&self, id: &TicketId) -> Result<(), Error>;
}
