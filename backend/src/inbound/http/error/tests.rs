//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::test as actix_test;
use actix_web::{App, post, web};
use rstest::rstest;
use serde::Deserialize;
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn render(error: Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(&error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body()).await.expect("body");
    let body = serde_json::from_slice(&bytes).expect("error JSON");
    (status, header, body)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id() {
    let err = Error::internal("connection string leaked")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"secret": "x"}));

    let (status, header, body) = render(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(body.message(), "Internal server error");
    assert_eq!(body.trace_id(), Some(TRACE_ID));
    assert!(body.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn conflict_details_reach_the_client() {
    let err = Error::conflict("Username already taken")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"code": "duplicate_username"}));

    let (status, header, body) = render(err).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(body.message(), "Username already taken");
    assert_eq!(body.details(), Some(&json!({"code": "duplicate_username"})));
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_header() {
    let (status, header, body) = render(Error::not_found("issue not found")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(header.is_none());
    assert_eq!(body.trace_id(), None);
}

#[rstest]
fn actix_errors_become_redacted_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}

#[derive(Deserialize)]
struct Probe {
    #[expect(dead_code, reason = "only deserialised")]
    name: String,
}

#[derive(Deserialize)]
struct ProbeQuery {
    #[expect(dead_code, reason = "only deserialised")]
    page: u32,
}

#[post("/probe")]
async fn probe(_body: web::Json<Probe>, _query: web::Query<ProbeQuery>) -> &'static str {
    "ok"
}

#[rstest]
#[case("/probe?page=1", "{not json", "malformed_body")]
#[case("/probe?page=1", r#"{"name": 7}"#, "malformed_body")]
#[case("/probe?page=first", r#"{"name": "x"}"#, "malformed_query")]
#[actix_web::test]
async fn extractor_failures_share_the_error_envelope(
    #[case] uri: &str,
    #[case] body: &'static str,
    #[case] detail_code: &str,
) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .service(probe),
    )
    .await;
    let req = actix_test::TestRequest::post()
        .uri(uri)
        .insert_header(("content-type", "application/json"))
        .set_payload(body)
        .to_request();

    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: Error = actix_test::read_body_json(res).await;
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details().and_then(|d| d.get("code")).and_then(Value::as_str),
        Some(detail_code)
    );
}
