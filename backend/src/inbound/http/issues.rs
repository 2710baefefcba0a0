//! Civic issue endpoints.
//!
//! ```text
//! POST   /api/issues               report an issue
//! GET    /api/issues?status=OPEN   list, newest first
//! GET    /api/issues/{id}
//! PUT    /api/issues/{id}/status   admin only
//! DELETE /api/issues/{id}          admin only
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{
    FieldValidationError, Issue, IssueCategory, IssueDraft, IssueFilter, IssueInput, IssueStatus,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::schemas::{ErrorSchema, IssueStatusSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{field_error, non_blank, parse_issue_id};

/// Request body for `POST /api/issues`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateIssueRequest {
    #[schema(example = "Broken streetlight")]
    pub title: String,
    #[schema(example = "The lamp outside no. 12 has been dark for a week")]
    pub description: String,
    #[schema(example = "Lighting")]
    pub category: String,
    #[schema(example = "12 Mill Lane")]
    pub location: Option<String>,
    /// Defaults to `false`.
    pub critical: Option<bool>,
}

/// Request body for `PUT /api/issues/{id}/status`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct UpdateStatusRequest {
    #[schema(example = "IN_PROGRESS")]
    pub status: String,
}

/// Optional filters for `GET /api/issues`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IssueListQuery {
    /// `OPEN`, `IN_PROGRESS`, `RESOLVED` or `REJECTED`.
    pub status: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
}

impl IssueListQuery {
    fn to_filter(&self) -> ApiResult<IssueFilter> {
        let status = non_blank(self.status.as_deref())
            .map(str::parse::<IssueStatus>)
            .transpose()
            .map_err(field_error)?;
        let category = non_blank(self.category.as_deref())
            .map(IssueCategory::new)
            .transpose()
            .map_err(field_error)?;
        Ok(IssueFilter { status, category })
    }
}

fn parse_status(raw: &str) -> ApiResult<IssueStatus> {
    if raw.trim().is_empty() {
        return Err(field_error(FieldValidationError::blank("status")));
    }
    raw.parse().map_err(field_error)
}

/// Reporter reference nested in [`IssueResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReporterResponse {
    pub username: String,
}

/// Wire representation of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: Option<String>,
    pub critical: bool,
    #[schema(value_type = IssueStatusSchema)]
    pub status: IssueStatus,
    pub created_by: ReporterResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Issue> for IssueResponse {
    fn from(issue: &Issue) -> Self {
        Self {
            id: *issue.id().as_uuid(),
            title: issue.title().to_string(),
            description: issue.description().to_string(),
            category: issue.category().to_string(),
            location: issue.location().map(str::to_owned),
            critical: issue.is_critical(),
            status: issue.status(),
            created_by: ReporterResponse {
                username: issue.created_by().to_string(),
            },
            created_at: issue.created_at(),
            updated_at: issue.updated_at(),
        }
    }
}

/// Report a new issue. It starts in `OPEN`.
#[utoipa::path(
    post,
    path = "/api/issues",
    request_body = CreateIssueRequest,
    responses(
        (status = 201, description = "Issue created", body = IssueResponse),
        (status = 400, description = "Missing or blank field", body = ErrorSchema),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorSchema),
        (status = 503, description = "Issue store unavailable", body = ErrorSchema)
    ),
    tags = ["issues"],
    operation_id = "createIssue"
)]
#[post("/issues")]
pub async fn create_issue(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateIssueRequest>,
) -> ApiResult<HttpResponse> {
    let draft = IssueDraft::try_from_input(IssueInput {
        title: &payload.title,
        description: &payload.description,
        category: &payload.category,
        location: payload.location.as_deref(),
        critical: payload.critical.unwrap_or(false),
    })
    .map_err(field_error)?;
    let issue = state.issues.create(user.username(), draft).await?;
    Ok(HttpResponse::Created().json(IssueResponse::from(&issue)))
}

/// List issues, newest first.
#[utoipa::path(
    get,
    path = "/api/issues",
    params(IssueListQuery),
    responses(
        (status = 200, description = "Matching issues", body = [IssueResponse]),
        (status = 400, description = "Unsupported status filter", body = ErrorSchema),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorSchema),
        (status = 503, description = "Issue store unavailable", body = ErrorSchema)
    ),
    tags = ["issues"],
    operation_id = "listIssues"
)]
#[get("/issues")]
pub async fn list_issues(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    query: web::Query<IssueListQuery>,
) -> ApiResult<web::Json<Vec<IssueResponse>>> {
    let filter = query.to_filter()?;
    let issues = state.issues_query.list(&filter).await?;
    Ok(web::Json(issues.iter().map(IssueResponse::from).collect()))
}

/// Fetch a single issue.
#[utoipa::path(
    get,
    path = "/api/issues/{id}",
    params(("id" = Uuid, Path, description = "Issue identifier")),
    responses(
        (status = 200, description = "Issue", body = IssueResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorSchema),
        (status = 404, description = "No such issue", body = ErrorSchema)
    ),
    tags = ["issues"],
    operation_id = "getIssue"
)]
#[get("/issues/{id}")]
pub async fn get_issue(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<IssueResponse>> {
    let id = parse_issue_id(&path)?;
    let issue = state.issues_query.get(id).await?;
    Ok(web::Json(IssueResponse::from(&issue)))
}

/// Move an issue to another lifecycle status.
#[utoipa::path(
    put,
    path = "/api/issues/{id}/status",
    params(("id" = Uuid, Path, description = "Issue identifier")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated issue", body = IssueResponse),
        (status = 400, description = "Malformed identifier or status", body = ErrorSchema),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorSchema),
        (status = 403, description = "Caller is not an administrator", body = ErrorSchema),
        (status = 404, description = "No such issue", body = ErrorSchema)
    ),
    tags = ["issues"],
    operation_id = "updateIssueStatus"
)]
#[put("/issues/{id}/status")]
pub async fn update_issue_status(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateStatusRequest>,
) -> ApiResult<web::Json<IssueResponse>> {
    let id = parse_issue_id(&path)?;
    let status = parse_status(&payload.status)?;
    let issue = state.issues.update_status(user.username(), id, status).await?;
    Ok(web::Json(IssueResponse::from(&issue)))
}

/// Delete an issue.
#[utoipa::path(
    delete,
    path = "/api/issues/{id}",
    params(("id" = Uuid, Path, description = "Issue identifier")),
    responses(
        (status = 204, description = "Issue deleted"),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorSchema),
        (status = 403, description = "Caller is not an administrator", body = ErrorSchema),
        (status = 404, description = "No such issue", body = ErrorSchema)
    ),
    tags = ["issues"],
    operation_id = "deleteIssue"
)]
#[delete("/issues/{id}")]
pub async fn delete_issue(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_issue_id(&path)?;
    state.issues.delete(user.username(), id).await?;
    Ok(HttpResponse::NoContent().finish())
}
