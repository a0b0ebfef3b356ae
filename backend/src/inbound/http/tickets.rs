//! Ticket CRUD handlers. Every route requires a bearer token.
//!
//! ```text
//! GET    /api/tickets
//! GET    /api/tickets/{id}
//! POST   /api/tickets      {"title":"…","description":"…","priority":"High"}
//! PUT    /api/tickets/{id} {"status":"Closed"}
//! DELETE /api/tickets/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

use crate::domain::{Error, NewTicket, Ticket, TicketId, TicketPatch, TicketPriority};
use crate::inbound::http::ApiResult;
use crate::inbound::http::MessageResponse;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{malformed_body, map_ticket_validation_error};

/// Request body for `POST /api/tickets`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    #[serde(default)]
    #[schema(example = "Printer on floor 2 is jammed")]
    pub title: Option<String>,
    #[serde(default)]
    #[schema(example = "Tray 2 shows a paper jam after every job")]
    pub description: Option<String>,
    /// `Low`, `Medium` or `High`. Omitted or empty means `Medium`.
    #[serde(default)]
    #[schema(example = "High")]
    pub priority: Option<String>,
    /// Assignee email. Omitted, `null` or empty leaves the ticket unassigned.
    #[serde(default)]
    #[schema(example = "ada@example.com")]
    pub assigned_to: Option<String>,
}

impl CreateTicketRequest {
    fn into_draft(self) -> Result<NewTicket, Error> {
        let priority = self
            .priority
            .filter(|raw| !raw.is_empty())
            .map(|raw| raw.parse::<TicketPriority>())
            .transpose()
            .map_err(map_ticket_validation_error)?;
        NewTicket::try_new(
            self.title.unwrap_or_default(),
            self.description.unwrap_or_default(),
            priority,
            self.assigned_to,
        )
        .map_err(map_ticket_validation_error)
    }
}

/// Request body for `PUT /api/tickets/{id}`.
///
/// Omitted or empty fields keep their current value. `assignedTo` is the
/// exception: an explicit `null` or `""` unassigns the ticket.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[schema(example = "Medium")]
    pub priority: Option<String>,
    #[serde(default)]
    #[schema(example = "In Progress")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub assigned_to: Option<Option<String>>,
}

// Distinguishes an explicit `null` (`Some(None)`) from an absent field (`None`).
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl UpdateTicketRequest {
    /// Parse a raw PUT body. An empty body is an empty patch.
    fn from_body(body: &[u8]) -> Result<Self, Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(malformed_body)
    }

    fn into_patch(self) -> Result<TicketPatch, Error> {
        TicketPatch::from_raw(
            self.title,
            self.description,
            self.priority,
            self.status,
            self.assigned_to,
        )
        .map_err(map_ticket_validation_error)
    }
}

fn parse_ticket_id(raw: String) -> Result<TicketId, Error> {
    TicketId::new(raw).map_err(|_| Error::not_found("Ticket not found"))
}

/// List every ticket in storage order.
#[utoipa::path(
    get,
    path = "/api/tickets",
    responses(
        (status = 200, description = "Tickets", body = [Ticket]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tickets"],
    operation_id = "listTickets"
)]
#[get("/tickets")]
pub async fn list_tickets(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<Ticket>>> {
    Ok(web::Json(state.tickets_query.list_tickets().await?))
}

/// Fetch one ticket.
#[utoipa::path(
    get,
    path = "/api/tickets/{id}",
    params(("id" = String, Path, description = "Ticket identifier")),
    responses(
        (status = 200, description = "Ticket", body = Ticket),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Ticket not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tickets"],
    operation_id = "getTicket"
)]
#[get("/tickets/{id}")]
pub async fn get_ticket(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Ticket>> {
    let id = parse_ticket_id(path.into_inner())?;
    Ok(web::Json(state.tickets_query.get_ticket(&id).await?))
}

/// Create a ticket. Status starts as `Open`.
#[utoipa::path(
    post,
    path = "/api/tickets",
    request_body = CreateTicketRequest,
    responses(
        (status = 201, description = "Ticket created", body = Ticket),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tickets"],
    operation_id = "createTicket"
)]
#[post("/tickets")]
pub async fn create_ticket(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    payload: web::Json<CreateTicketRequest>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft()?;
    let ticket = state.tickets.create_ticket(draft).await?;
    Ok(HttpResponse::Created().json(ticket))
}

/// Partially update a ticket.
///
/// A bodyless PUT only refreshes `updatedAt`.
#[utoipa::path(
    put,
    path = "/api/tickets/{id}",
    params(("id" = String, Path, description = "Ticket identifier")),
    request_body = UpdateTicketRequest,
    responses(
        (status = 200, description = "Ticket updated", body = Ticket),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Ticket not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tickets"],
    operation_id = "updateTicket"
)]
#[put("/tickets/{id}")]
pub async fn update_ticket(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<web::Json<Ticket>> {
    let id = parse_ticket_id(path.into_inner())?;
    let patch = UpdateTicketRequest::from_body(&body)?.into_patch()?;
    Ok(web::Json(state.tickets.update_ticket(&id, patch).await?))
}

/// Delete a ticket.
#[utoipa::path(
    delete,
    path = "/api/tickets/{id}",
    params(("id" = String, Path, description = "Ticket identifier")),
    responses(
        (status = 200, description = "Ticket deleted", body = MessageResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Ticket not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tickets"],
    operation_id = "deleteTicket"
)]
#[delete("/tickets/{id}")]
pub async fn delete_ticket(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_ticket_id(path.into_inner())?;
    state.tickets.delete_ticket(&id).await?;
    Ok(web::Json(MessageResponse::new("Ticket deleted successfully")))
}
