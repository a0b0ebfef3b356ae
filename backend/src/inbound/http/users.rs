//! Authentication and users API handlers.
//!
//! ```text
//! POST /api/auth/login {"email":"ada@example.com","password":"secret"}
//! POST /api/auth/logout
//! GET /api/users
//! ```

use actix_web::{HttpRequest, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Error, LoginCredentials, LoginSession, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::MessageResponse;
use crate::inbound::http::auth::{AuthenticatedUser, BearerToken, bearer_token};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_login_validation_error;

/// Login request body for `POST /api/auth/login`.
///
/// Both fields are optional on the wire so omissions get the same 400 as
/// empty strings.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[serde(default)]
    #[schema(example = "secret")]
    pub password: Option<String>,
}

impl LoginRequest {
    fn into_credentials(self) -> Result<LoginCredentials, Error> {
        let email = self.email.unwrap_or_default();
        let password = self.password.unwrap_or_default();
        LoginCredentials::try_from_parts(&email, &password).map_err(map_login_validation_error)
    }
}

/// Exchange email and password for a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginSession),
        (status = 400, description = "Email or password missing", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginSession>> {
    let credentials = payload.into_inner().into_credentials()?;
    let session = state.login.login(&credentials).await?;
    Ok(web::Json(session))
}

/// Revoke the presented bearer token, if any. Always succeeds.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<MessageResponse>> {
    let token = match bearer_token(&req) {
        BearerToken::Present(token) => Some(token),
        BearerToken::Missing | BearerToken::Malformed => None,
    };
    state.login.logout(token.as_ref()).await?;
    info!(revoked = token.is_some(), "logout");
    Ok(web::Json(MessageResponse::new("Logged out successfully")))
}

/// List every provisioned user, without passwords.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use ticketdesk::inbound::http::users::list_users;
///
/// let app = App::new().service(web::scope("/api").service(list_users));
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [User]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list_all().await?;
    Ok(web::Json(users))
}

#[cfg(test)]
mod tests;
