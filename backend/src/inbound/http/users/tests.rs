//! Tests for the authentication and users handlers.

use super::*;
use crate::domain::ports::MockLoginService;
use crate::domain::{ErrorCode, SessionToken};
use crate::inbound::http::test_utils::{
    ADA_EMAIL, ADA_PASSWORD, bearer, in_memory_state, login_token, seeded_store, test_app,
};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

#[actix_web::test]
async fn login_returns_token_and_password_free_user() {
    let app = actix_test::init_service(test_app(in_memory_state(seeded_store()))).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": ADA_EMAIL, "password": ADA_PASSWORD}))
        .to_request();

    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert!(body["token"].as_str().is_some_and(|token| !token.is_empty()));
    assert_eq!(
        body["user"],
        json!({"id": "1", "name": "Ada Lovelace", "email": ADA_EMAIL, "role": "admin"})
    );
}

#[rstest]
#[case(json!({}), "email")]
#[case(json!({"email": ADA_EMAIL}), "password")]
#[case(json!({"email": "", "password": "x"}), "email")]
#[case(json!({"email": ADA_EMAIL, "password": null}), "password")]
#[actix_web::test]
async fn login_requires_both_fields(#[case] payload: Value, #[case] field: &str) {
    let app = actix_test::init_service(test_app(in_memory_state(seeded_store()))).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(payload)
        .to_request();

    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], json!("invalid_request"));
    assert_eq!(body["error"], json!("Email and password are required"));
    assert_eq!(body["details"]["field"], json!(field));
}

#[rstest]
#[case(ADA_EMAIL, "wrong")]
#[case("nobody@example.com", ADA_PASSWORD)]
#[case("   ", ADA_PASSWORD)]
#[actix_web::test]
async fn login_rejects_bad_credentials(#[case] email: &str, #[case] password: &str) {
    let app = actix_test::init_service(test_app(in_memory_state(seeded_store()))).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": email, "password": password}))
        .to_request();

    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"], json!("Invalid credentials"));
}

#[actix_web::test]
async fn malformed_login_body_is_a_bad_request() {
    let app = actix_test::init_service(test_app(in_memory_state(seeded_store()))).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\":")
        .to_request();

    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], json!("malformed_body"));
}

#[actix_web::test]
async fn logout_revokes_the_presented_token() {
    let app = actix_test::init_service(test_app(in_memory_state(seeded_store()))).await;
    let token = login_token(&app).await;

    let req = actix_test::TestRequest::post()
        .uri("/api/auth/logout")
        .insert_header(bearer(&token))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({"message": "Logged out successfully"}));

    let req = actix_test::TestRequest::get()
        .uri("/api/users")
        .insert_header(bearer(&token))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case(None)]
#[case(Some("Bearer never-issued"))]
#[case(Some("Basic abc"))]
#[actix_web::test]
async fn logout_always_succeeds(#[case] authorization: Option<&str>) {
    let app = actix_test::init_service(test_app(in_memory_state(seeded_store()))).await;
    let mut req = actix_test::TestRequest::post().uri("/api/auth/logout");
    if let Some(value) = authorization {
        req = req.insert_header(("authorization", value));
    }

    let res = actix_test::call_service(&app, req.to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn list_users_hides_passwords() {
    let app = actix_test::init_service(test_app(in_memory_state(seeded_store()))).await;
    let token = login_token(&app).await;

    let req = actix_test::TestRequest::get()
        .uri("/api/users")
        .insert_header(bearer(&token))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    let users = body.as_array().expect("users array");
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|user| user.get("password").is_none()));
}

#[rstest]
#[case(None, "Access token required")]
#[case(Some("Token abc"), "Access token required")]
#[case(Some("Bearer unknown"), "Invalid or expired token")]
#[actix_web::test]
async fn list_users_requires_a_valid_token(
    #[case] authorization: Option<&str>,
    #[case] message: &str,
) {
    let app = actix_test::init_service(test_app(in_memory_state(seeded_store()))).await;
    let mut req = actix_test::TestRequest::get().uri("/api/users");
    if let Some(value) = authorization {
        req = req.insert_header(("authorization", value));
    }

    let res = actix_test::call_service(&app, req.to_request()).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let trace_header = res
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], json!("unauthorized"));
    assert_eq!(body["error"], json!(message));
    assert_eq!(body["traceId"].as_str().map(str::to_owned), trace_header);
}

#[actix_web::test]
async fn login_service_failures_are_redacted() {
    let mut login_service = MockLoginService::new();
    login_service
        .expect_login()
        .return_once(|_| Err(Error::internal("users.json: permission denied")));
    let mut state = in_memory_state(seeded_store());
    state.login = Arc::new(login_service);
    let app = actix_test::init_service(test_app(state)).await;

    let req = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": ADA_EMAIL, "password": ADA_PASSWORD}))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], json!("internal_error"));
    assert_eq!(body["error"], json!("Internal server error"));
}

#[actix_web::test]
async fn token_of_a_removed_user_is_rejected() {
    let mut login_service = MockLoginService::new();
    login_service
        .expect_authenticate()
        .withf(|token: &SessionToken| token.as_str() == "stale")
        .return_once(|_| Err(Error::unauthorized("User not found")));
    let mut state = in_memory_state(seeded_store());
    state.login = Arc::new(login_service);
    let app = actix_test::init_service(test_app(state)).await;

    let req = actix_test::TestRequest::get()
        .uri("/api/users")
        .insert_header(bearer("stale"))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], json!(ErrorCode::Unauthorized));
    assert_eq!(body["error"], json!("User not found"));
}
