//! Bearer token extractor.
//!
//! Handlers that take [`AuthenticatedUser`] only run once the
//! `Authorization: Bearer <token>` header carries a token the configured
//! [`TokenIssuer`](crate::domain::ports::TokenIssuer) accepts. The scheme name
//! is matched case-insensitively. Every rejection is the same `401` body;
//! the specific reason is only logged.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::ports::TokenError;
use crate::domain::{Error, Username};

use super::state::HttpState;

const BEARER_SCHEME: &str = "bearer";

/// Client-facing message for every rejected credential.
pub(crate) const UNAUTHENTICATED_MESSAGE: &str = "missing or invalid bearer token";

/// Username asserted by a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(Username);

impl AuthenticatedUser {
    /// Subject of the verified token.
    pub fn username(&self) -> &Username {
        &self.0
    }

    /// Take ownership of the subject.
    pub fn into_inner(self) -> Username {
        self.0
    }
}

fn rejected(reason: &'static str) -> Error {
    debug!(reason, "bearer authentication rejected");
    Error::unauthorized(UNAUTHENTICATED_MESSAGE)
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| rejected("missing authorization header"))?;
    let value = header
        .to_str()
        .map_err(|_| rejected("authorization header is not ASCII"))?;
    let (scheme, token) = value
        .trim_start()
        .split_once(' ')
        .ok_or_else(|| rejected("authorization header has no credentials"))?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(rejected("authorization scheme is not bearer"));
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(rejected("bearer token is empty"));
    }
    Ok(token)
}

fn map_token_error(err: TokenError) -> Error {
    match err {
        TokenError::Expired => rejected("token expired"),
        TokenError::Invalid { message } => {
            debug!(reason = %message, "bearer token failed verification");
            Error::unauthorized(UNAUTHENTICATED_MESSAGE)
        }
        TokenError::Signing { message } => Error::internal(message),
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let token = bearer_token(req)?;
    state
        .tokens
        .verify(token)
        .map(AuthenticatedUser)
        .map_err(map_token_error)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::inbound::http::test_utils::{fixed_token_state, VALID_TOKEN};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse};
    use rstest::rstest;

    async fn call(header: Option<&str>) -> (StatusCode, String) {
        let app = actix_test::init_service(
            App::new().app_data(fixed_token_state()).route(
                "/whoami",
                web::get().to(|user: AuthenticatedUser| async move {
                    HttpResponse::Ok().body(user.username().as_str().to_owned())
                }),
            ),
        )
        .await;
        let mut req = actix_test::TestRequest::get().uri("/whoami");
        if let Some(value) = header {
            req = req.insert_header((AUTHORIZATION, value));
        }
        let res = actix_test::call_service(&app, req.to_request()).await;
        let status = res.status();
        let body = actix_test::read_body(res).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[rstest]
    #[case("Bearer")]
    #[case("bearer")]
    #[case("BEARER")]
    #[actix_web::test]
    async fn valid_token_resolves_username(#[case] scheme: &str) {
        let (status, body) = call(Some(&format!("{scheme} {VALID_TOKEN}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ada");
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Basic YWRhOnB3"))]
    #[case(Some("Bearer "))]
    #[case(Some("Bearer"))]
    #[case(Some("Bearer forged"))]
    #[actix_web::test]
    async fn rejected_headers_share_one_response(#[case] header: Option<&str>) {
        let (status, body) = call(header).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let payload: Error = serde_json::from_str(&body).expect("error payload");
        assert_eq!(payload.code(), ErrorCode::Unauthorized);
        assert_eq!(payload.message(), UNAUTHENTICATED_MESSAGE);
    }

    #[rstest]
    #[case(TokenError::expired())]
    #[case(TokenError::invalid("bad signature"))]
    fn token_failures_are_indistinguishable(#[case] err: TokenError) {
        let mapped = map_token_error(err);
        assert_eq!(mapped.code(), ErrorCode::Unauthorized);
        assert_eq!(mapped.message(), UNAUTHENTICATED_MESSAGE);
    }
}
