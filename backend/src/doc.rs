//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every handler annotated with `#[utoipa::path]` and the
//! wire types they exchange. The document is served by Swagger UI in debug
//! builds and printed by the `openapi-dump` binary.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, LoginSession, Ticket, TicketPriority, TicketStatus, User};
use crate::inbound::http::MessageResponse;
use crate::inbound::http::tickets::{CreateTicketRequest, UpdateTicketRequest};
use crate::inbound::http::users::LoginRequest;

/// Register the bearer token scheme issued by `POST /api/auth/login`.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Opaque token returned by POST /api/auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Ticket desk API",
        description = "Bearer-token authenticated ticket tracking with JSON-file storage."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::list_users,
        crate::inbound::http::tickets::list_tickets,
        crate::inbound::http::tickets::get_ticket,
        crate::inbound::http::tickets::create_ticket,
        crate::inbound::http::tickets::update_ticket,
        crate::inbound::http::tickets::delete_ticket,
        crate::inbound::http::health::api_health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Ticket,
        TicketPriority,
        TicketStatus,
        User,
        LoginSession,
        Error,
        ErrorCode,
        MessageResponse,
        LoginRequest,
        CreateTicketRequest,
        UpdateTicketRequest
    )),
    tags(
        (name = "auth", description = "Login and logout"),
        (name = "users", description = "Provisioned users"),
        (name = "tickets", description = "Ticket CRUD"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
