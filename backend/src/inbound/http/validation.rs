//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every client-side validation failure becomes an `invalid_request` error
//! whose `details` name the offending field and a stable machine code.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, LoginValidationError, TicketValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    EmptyField,
    UnknownValue,
    MalformedBody,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::EmptyField => "empty_field",
            Self::UnknownValue => "unknown_value",
            Self::MalformedBody => "malformed_body",
        }
    }
}

fn field_error(message: impl Into<String>, field: &str, code: ValidationCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

fn value_error(message: impl Into<String>, field: &str, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "value": value,
        "code": ValidationCode::UnknownValue.as_str(),
    }))
}

/// Login bodies need both fields; the message is shared by either omission.
pub(crate) fn map_login_validation_error(err: LoginValidationError) -> Error {
    const MESSAGE: &str = "Email and password are required";
    match err {
        LoginValidationError::EmptyEmail => {
            field_error(MESSAGE, "email", ValidationCode::MissingField)
        }
        LoginValidationError::EmptyPassword => {
            field_error(MESSAGE, "password", ValidationCode::MissingField)
        }
    }
}

pub(crate) fn map_ticket_validation_error(err: TicketValidationError) -> Error {
    const REQUIRED: &str = "Title and description are required";
    match err {
        TicketValidationError::EmptyTitle => {
            field_error(REQUIRED, "title", ValidationCode::EmptyField)
        }
        TicketValidationError::EmptyDescription => {
            field_error(REQUIRED, "description", ValidationCode::EmptyField)
        }
        TicketValidationError::EmptyId => {
            field_error(err.to_string(), "id", ValidationCode::EmptyField)
        }
        TicketValidationError::UnknownPriority { ref value } => {
            value_error(err.to_string(), "priority", value)
        }
        TicketValidationError::UnknownStatus { ref value } => {
            value_error(err.to_string(), "status", value)
        }
    }
}

/// 400 for a request body that is not the expected JSON.
pub(crate) fn malformed_body(err: impl std::fmt::Display) -> Error {
    debug!(error = %err, "rejected request body");
    field_error(
        format!("malformed JSON body: {err}"),
        "body",
        ValidationCode::MalformedBody,
    )
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    malformed_body(err).into()
}

/// JSON extractor configuration answering malformed bodies with 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}
