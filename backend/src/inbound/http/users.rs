//! Profile endpoint for the bearer token's subject.

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Role, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::schemas::{ErrorSchema, RoleSchema};
use crate::inbound::http::state::HttpState;

/// Public view of an account. The password hash never leaves the domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub area_code: String,
    #[schema(value_type = RoleSchema)]
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfileResponse {
    fn from(user: &User) -> Self {
        let profile = user.profile();
        Self {
            id: *user.id().as_uuid(),
            first_name: profile.first_name().to_string(),
            last_name: profile.last_name().to_string(),
            username: profile.username().to_string(),
            email: profile.email().to_string(),
            area_code: profile.area_code().to_string(),
            role: user.role(),
            created_at: user.created_at(),
        }
    }
}

/// Return the signed-in user's profile.
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user", body = UserProfileResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<UserProfileResponse>> {
    let found = state.auth.current_user(user.username()).await?;
    Ok(web::Json(UserProfileResponse::from(&found)))
}
