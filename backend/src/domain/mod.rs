//! Domain primitives, services and ports.
//!
//! Purpose: Define strongly typed entities for users, sessions and tickets,
//! the services that implement the driving ports, and the driven ports those
//! services depend on. Nothing here knows about HTTP or the filesystem.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User, UserId, UserRecord: provisioned users and their public view.
//! - LoginCredentials, SessionToken, LoginSession: authentication values.
//! - Ticket, NewTicket, TicketPatch: the ticket aggregate and its inputs.
//! - AuthService, TicketService, CollectionUserDirectory: port implementations.
//! - TraceId: request-scoped correlation identifier.

pub mod auth;
mod auth_service;
mod collection;
pub mod error;
pub mod ports;
pub mod ticket;
mod ticket_service;
pub mod trace_id;
pub mod user;
mod user_directory;

pub use self::auth::{
    LoginCredentials, LoginSession, LoginValidationError, SessionToken,
    SessionTokenValidationError,
};
pub use self::auth_service::AuthService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ticket::{
    NewTicket, Ticket, TicketId, TicketPatch, TicketPriority, TicketStatus, TicketValidationError,
};
pub use self::ticket_service::TicketService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserId, UserRecord, UserValidationError};
pub use self::user_directory::CollectionUserDirectory;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use ticketdesk::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Ticket not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
