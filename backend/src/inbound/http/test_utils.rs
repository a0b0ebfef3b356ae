//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use mockable::DefaultClock;
use serde_json::{Value, json};

use crate::Trace;
use crate::domain::ports::CollectionName;
use crate::domain::{AuthService, CollectionUserDirectory, TicketService};
use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{configure, route_not_found};
use crate::outbound::persistence::InMemoryCollectionStore;
use crate::outbound::sessions::InMemorySessionRegistry;

pub const ADA_EMAIL: &str = "ada@example.com";
pub const ADA_PASSWORD: &str = "analytical";

/// Users every test app starts with.
pub fn seed_users() -> Vec<Value> {
    vec![
        json!({
            "id": "1",
            "name": "Ada Lovelace",
            "email": ADA_EMAIL,
            "password": ADA_PASSWORD,
            "role": "admin"
        }),
        json!({
            "id": "2",
            "name": "Grace Hopper",
            "email": "grace@example.com",
            "password": "compiler",
            "role": "agent"
        }),
    ]
}

/// Wire the real services over in-memory adapters.
pub fn in_memory_state(store: Arc<InMemoryCollectionStore>) -> HttpState {
    let directory = Arc::new(CollectionUserDirectory::new(store.clone()));
    let sessions = Arc::new(InMemorySessionRegistry::new());
    let tickets = Arc::new(TicketService::new(store, Arc::new(DefaultClock)));
    HttpState::new(
        Arc::new(AuthService::new(directory.clone(), sessions)),
        directory,
        tickets.clone(),
        tickets,
    )
}

/// Store seeded with [`seed_users`] and no tickets.
pub fn seeded_store() -> Arc<InMemoryCollectionStore> {
    Arc::new(InMemoryCollectionStore::new().with_collection(CollectionName::users(), seed_users()))
}

/// Full application as the server builds it, minus Swagger UI.
pub fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(HealthState::new()))
        .wrap(Trace)
        .configure(configure)
        .default_service(web::to(route_not_found))
}

/// Log in as Ada and return the bearer token.
pub async fn login_token<S>(app: &S) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": ADA_EMAIL, "password": ADA_PASSWORD}))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(app, req).await;
    body["token"].as_str().expect("token in login body").to_owned()
}

/// `Authorization` header value for `token`.
pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (
        actix_web::http::header::AUTHORIZATION,
        format!("Bearer {token}"),
    )
}
