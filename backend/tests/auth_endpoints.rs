//! End-to-end registration, login and profile flows over in-memory storage.

#[macro_use]
mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use civicflow_backend::domain::Role;
use rstest::rstest;
use serde_json::{Value, json};

use support::{PASSWORD, account, bearer, registration, state_with};

#[rstest]
#[actix_web::test]
async fn registered_user_can_log_in_and_read_profile() {
    let app = civicflow_app!(state_with(Vec::new()));

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(registration("ada", "Ada@Example.org"))
        .to_request();
    let registered: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(registered["role"], "USER");
    assert_eq!(registered["email"], "ada@example.org");

    let token = login_token!(app, "ada");
    let req = test::TestRequest::get()
        .uri("/api/users/me")
        .insert_header(bearer(&token))
        .to_request();
    let profile: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(profile["username"], "ada");
    assert_eq!(profile["areaCode"], "N1");
    assert!(profile.get("password").is_none());
    assert!(profile.get("passwordHash").is_none());
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_leaves_first_account_intact() {
    let app = civicflow_app!(state_with(Vec::new()));
    let first = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(registration("ada", "ada@example.org"))
        .to_request();
    assert_eq!(test::call_service(&app, first).await.status(), StatusCode::OK);

    let clash = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(registration("grace", "ADA@example.org"))
        .to_request();
    let res = test::call_service(&app, clash).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["details"]["code"], "duplicate_email");

    let token = login_token!(app, "ada");
    assert!(!token.is_empty());
}

#[rstest]
#[actix_web::test]
async fn seeded_admin_role_survives_login() {
    let app = civicflow_app!(state_with(vec![account("clerk", Role::Admin)]));
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "clerk", "password": PASSWORD }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["role"], "ADMIN");
    assert_eq!(body["firstName"], "Grace");
}

#[rstest]
#[case(json!({ "username": "clerk", "password": "nope" }))]
#[case(json!({ "username": "nobody", "password": PASSWORD }))]
#[actix_web::test]
async fn bad_credentials_are_unauthorised(#[case] body: Value) {
    let app = civicflow_app!(state_with(vec![account("clerk", Role::User)]));
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(body)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let err: Value = test::read_body_json(res).await;
    assert_eq!(err["message"], "Invalid username or password");
    assert_eq!(err["details"]["code"], "invalid_credentials");
}

#[rstest]
#[case(None)]
#[case(Some("Bearer not.a.jwt"))]
#[case(Some("Basic YWRhOnNlY3JldA=="))]
#[actix_web::test]
async fn profile_requires_valid_bearer(#[case] header: Option<&str>) {
    let app = civicflow_app!(state_with(Vec::new()));
    let mut req = test::TestRequest::get().uri("/api/users/me");
    if let Some(value) = header {
        req = req.insert_header(("authorization", value));
    }
    let res = test::call_service(&app, req.to_request()).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let header_trace = res
        .headers()
        .get("trace-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let err: Value = test::read_body_json(res).await;
    assert_eq!(err["code"], "unauthorized");
    assert_eq!(err["traceId"].as_str(), header_trace.as_deref());
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let app = civicflow_app!(state_with(Vec::new()));
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"username\": ")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: Value = test::read_body_json(res).await;
    assert_eq!(err["code"], "invalid_request");
}
