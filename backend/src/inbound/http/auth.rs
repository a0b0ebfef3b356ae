//! Bearer-token authentication for protected handlers.
//!
//! Handlers opt in by taking an [`AuthenticatedUser`] argument. Extraction
//! runs before the handler body, so a rejected request never reaches it.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{Error, SessionToken, User};
use crate::inbound::http::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Outcome of reading the `Authorization` header.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum BearerToken {
    /// No header, or not a `Bearer` credential.
    Missing,
    /// `Bearer` scheme with a token that cannot have been issued.
    Malformed,
    /// A well-formed token.
    Present(SessionToken),
}

/// Read the bearer token from `Authorization: Bearer <token>`.
pub(crate) fn bearer_token(req: &HttpRequest) -> BearerToken {
    let Some(value) = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    else {
        return BearerToken::Missing;
    };
    let Some(raw) = value.strip_prefix(BEARER_PREFIX) else {
        return BearerToken::Missing;
    };
    match SessionToken::new(raw) {
        Ok(token) => BearerToken::Present(token),
        Err(_) => BearerToken::Malformed,
    }
}

/// The caller behind a valid bearer token.
///
/// # Examples
/// ```
/// use actix_web::{HttpResponse, get};
/// use ticketdesk::inbound::http::auth::AuthenticatedUser;
///
/// #[get("/whoami")]
/// async fn whoami(caller: AuthenticatedUser) -> HttpResponse {
///     HttpResponse::Ok().body(caller.user().email().to_owned())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(User);

impl AuthenticatedUser {
    /// The authenticated user.
    pub fn user(&self) -> &User {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let token = match token {
                BearerToken::Present(token) => token,
                BearerToken::Missing => return Err(Error::unauthorized("Access token required")),
                BearerToken::Malformed => {
                    return Err(Error::unauthorized("Invalid or expired token"));
                }
            };
            let user = state.login.authenticate(&token).await?;
            debug!(user_id = %user.id(), "request authenticated");
            Ok(Self(user))
        })
    }
}
