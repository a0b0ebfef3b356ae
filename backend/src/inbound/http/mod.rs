//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod tickets;
pub mod users;
pub mod validation;

use actix_web::web;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use error::{ApiResult, route_not_found};
pub use validation::json_config;

/// Plain `{"message": "..."}` acknowledgement body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Logged out successfully")]
    pub message: String,
}

impl MessageResponse {
    /// Wrap an acknowledgement message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Register the `/api` scope and the health probes.
///
/// Callers still provide `web::Data<HttpState>` and `web::Data<HealthState>`
/// and choose their own default service.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use ticketdesk::inbound::http::{configure, route_not_found};
///
/// let app = App::new()
///     .configure(configure)
///     .default_service(web::to(route_not_found));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::scope("/api")
                .service(health::api_health)
                .service(users::login)
                .service(users::logout)
                .service(users::list_users)
                .service(tickets::list_tickets)
                .service(tickets::get_ticket)
                .service(tickets::create_ticket)
                .service(tickets::update_ticket)
                .service(tickets::delete_ticket),
        )
        .service(health::ready)
        .service(health::live);
}
