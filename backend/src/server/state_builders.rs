//! Builders wiring the domain services to their production adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use ticketdesk::domain::{AuthService, CollectionUserDirectory, TicketService};
use ticketdesk::inbound::http::state::HttpState;
use ticketdesk::outbound::persistence::JsonFileCollectionStore;
use ticketdesk::outbound::sessions::InMemorySessionRegistry;

use super::ServerConfig;

/// Build the HTTP state over the JSON-file store in `config.data_dir`.
///
/// Sessions live in process memory and are lost on restart.
///
/// # Errors
/// Returns [`std::io::Error`] when the data directory cannot be created or
/// opened.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let store = Arc::new(JsonFileCollectionStore::open(config.data_dir())?);
    info!(data_dir = %store.root().display(), "opened collection store");

    let directory = Arc::new(CollectionUserDirectory::new(store.clone()));
    let sessions = Arc::new(InMemorySessionRegistry::new());
    let tickets = Arc::new(TicketService::new(store, Arc::new(DefaultClock)));

    Ok(web::Data::new(HttpState::new(
        Arc::new(AuthService::new(directory.clone(), sessions)),
        directory,
        tickets.clone(),
        tickets,
    )))
}
