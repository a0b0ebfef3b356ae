//! Ticket CRUD service implementing the ticket driving ports.
//!
//! Every operation loads the whole `tickets` collection. Mutations run the
//! load, modify and save cycle under a per-service async mutex so concurrent
//! writers within the process never overwrite each other. Reads skip the lock.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::collection::{decode_records, encode_records, map_store_error};
use crate::domain::ports::{CollectionName, CollectionStore, TicketsCommand, TicketsQuery};
use crate::domain::{Error, NewTicket, Ticket, TicketId, TicketPatch};

/// Ticket service over a [`CollectionStore`].
#[derive(Clone)]
pub struct TicketService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    writer: Arc<Mutex<()>>,
}

impl<S> TicketService<S> {
    /// Create a new service. Clones share one writer lock.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            writer: Arc::new(Mutex::new(())),
        }
    }
}

fn ticket_not_found() -> Error {
    Error::not_found("Ticket not found")
}

impl<S> TicketService<S>
where
    S: CollectionStore,
{
    async fn load_tickets(&self) -> Result<Vec<Ticket>, Error> {
        let collection = CollectionName::tickets();
        let raw = self
            .store
            .load(&collection)
            .await
            .map_err(map_store_error)?;
        decode_records(&collection, raw)
    }

    async fn save_tickets(&self, tickets: &[Ticket]) -> Result<(), Error> {
        let collection = CollectionName::tickets();
        let records = encode_records(&collection, tickets)?;
        self.store
            .save(&collection, records)
            .await
            .map_err(map_store_error)
    }

    fn position(tickets: &[Ticket], id: &TicketId) -> Result<usize, Error> {
        tickets
            .iter()
            .position(|ticket| ticket.id() == id)
            .ok_or_else(ticket_not_found)
    }
}

// Retry on the unlikely collision so ids stay unique within the collection.
fn fresh_id(existing: &[Ticket]) -> TicketId {
    loop {
        let id = TicketId::random();
        if existing.iter().all(|ticket| ticket.id() != &id) {
            return id;
        }
    }
}

#[async_trait]
impl<S> TicketsQuery for TicketService<S>
where
    S: CollectionStore,
{
    async fn list_tickets(&self) -> Result<Vec<Ticket>, Error> {
        self.load_tickets().await
    }

    async fn get_ticket(&self, id: &TicketId) -> Result<Ticket, Error> {
        self.load_tickets()
            .await?
            .into_iter()
            .find(|ticket| ticket.id() == id)
            .ok_or_else(ticket_not_found)
    }
}

#[async_trait]
impl<S> TicketsCommand for TicketService<S>
where
    S: CollectionStore,
{
    async fn create_ticket(&self, draft: NewTicket) -> Result<Ticket, Error> {
        let _guard = self.writer.lock().await;
        let mut tickets = self.load_tickets().await?;
        let ticket = Ticket::create(fresh_id(&tickets), draft, self.clock.utc());
        tickets.push(ticket.clone());
        self.save_tickets(&tickets).await?;
        info!(ticket_id = %ticket.id(), "ticket created");
        Ok(ticket)
    }

    async fn update_ticket(&self, id: &TicketId, patch: TicketPatch) -> Result<Ticket, Error> {
        let _guard = self.writer.lock().await;
        let mut tickets = self.load_tickets().await?;
        let index = Self::position(&tickets, id)?;
        let ticket = &mut tickets[index];
        ticket.apply(patch, self.clock.utc());
        let updated = ticket.clone();
        self.save_tickets(&tickets).await?;
        info!(ticket_id = %id, "ticket updated");
        Ok(updated)
    }

    async fn delete_ticket(&self, id: &TicketId) -> Result<(), Error> {
        let _guard = self.writer.lock().await;
        let mut tickets = self.load_tickets().await?;
        let index = Self::position(&tickets, id)?;
        tickets.remove(index);
        self.save_tickets(&tickets).await?;
        info!(ticket_id = %id, "ticket deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "ticket_service_tests.rs"]
mod tests;
