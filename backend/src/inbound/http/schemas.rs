//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework agnostic and do not derive `ToSchema`. The
//! wrappers here mirror their wire shape so handlers can reference them from
//! `utoipa` annotations.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request collides with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing service is temporarily unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "conflict")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Username already taken")]
    message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary machine-readable details.
    #[schema(example = json!({"field": "username", "code": "duplicate_username"}))]
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Role`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Role)]
pub enum RoleSchema {
    #[schema(rename = "USER")]
    User,
    #[schema(rename = "ADMIN")]
    Admin,
}

/// OpenAPI schema for [`crate::domain::IssueStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::IssueStatus)]
pub enum IssueStatusSchema {
    #[schema(rename = "OPEN")]
    Open,
    #[schema(rename = "IN_PROGRESS")]
    InProgress,
    #[schema(rename = "RESOLVED")]
    Resolved,
    #[schema(rename = "REJECTED")]
    Rejected,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[rstest]
    fn error_code_schema_lists_every_code() {
        let json = schema_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "unauthorized",
            "forbidden",
            "not_found",
            "conflict",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(json.contains(code), "missing {code}");
        }
    }

    #[rstest]
    fn error_schema_uses_camel_case_trace_id() {
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json::<ErrorSchema>().contains("traceId"));
    }

    #[rstest]
    fn enum_schemas_use_wire_spelling() {
        assert!(schema_json::<RoleSchema>().contains("ADMIN"));
        assert!(schema_json::<IssueStatusSchema>().contains("IN_PROGRESS"));
    }
}
