//! Registration and login handlers.
//!
//! ```text
//! POST /api/auth/register {"firstName":"Ada","lastName":"Lovelace","username":"ada",...}
//! POST /api/auth/login {"username":"ada","password":"s3cret"}
//! ```
//!
//! Both return the same [`AuthResponse`] shape carrying a signed bearer token.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AuthSession, LoginCredentials, Registration, RegistrationInput, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, RoleSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::field_error;

/// Request body for `POST /api/auth/register`.
///
/// Missing fields deserialise as empty strings so they surface as the same
/// field-level validation error as blank ones. Unknown fields, including any
/// attempt to pass a `role`, are ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "ada")]
    pub username: String,
    #[schema(example = "ada@example.org")]
    pub email: String,
    #[schema(example = "correct horse battery staple")]
    pub password: String,
    #[schema(example = "N1")]
    pub area_code: String,
}

impl RegisterRequest {
    fn as_input(&self) -> RegistrationInput<'_> {
        RegistrationInput {
            first_name: &self.first_name,
            last_name: &self.last_name,
            username: &self.username,
            email: &self.email,
            password: &self.password,
            area_code: &self.area_code,
        }
    }
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    #[schema(example = "ada")]
    pub username: String,
    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

/// Successful authentication payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Signed bearer token for the `Authorization` header.
    pub token: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[schema(value_type = RoleSchema)]
    pub role: Role,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        let user = session.user();
        let profile = user.profile();
        Self {
            token: session.token().to_owned(),
            username: profile.username().to_string(),
            email: profile.email().to_string(),
            first_name: profile.first_name().to_string(),
            last_name: profile.last_name().to_string(),
            role: user.role(),
        }
    }
}

/// Register a new account with the `USER` role.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = AuthResponse),
        (status = 400, description = "Missing or blank field", body = ErrorSchema),
        (status = 409, description = "Username or email already registered", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let registration = Registration::try_from_input(payload.as_input()).map_err(field_error)?;
    let session = state.auth.register(registration).await?;
    Ok(web::Json(session.into()))
}

/// Exchange a username and password for a bearer token.
///
/// Unknown usernames and wrong passwords produce the same `401` body.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AuthResponse),
        (status = 400, description = "Missing or blank field", body = ErrorSchema),
        (status = 401, description = "Invalid username or password", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(field_error)?;
    let session = state.auth.login(&credentials).await?;
    Ok(web::Json(session.into()))
}
