//! OpenAPI document for the CivicFlow REST API.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary for client generation.

use crate::inbound::http::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::inbound::http::issues::{
    CreateIssueRequest, IssueResponse, ReporterResponse, UpdateStatusRequest,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, IssueStatusSchema, RoleSchema};
use crate::inbound::http::users::UserProfileResponse;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme referenced by protected operations.
pub const BEARER_SCHEME: &str = "BearerAuth";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Token returned by POST /api/auth/register or /api/auth/login.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "CivicFlow backend API",
        description = "Resident accounts and civic issue reporting."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::users::current_user,
        crate::inbound::http::issues::create_issue,
        crate::inbound::http::issues::list_issues,
        crate::inbound::http::issues::get_issue,
        crate::inbound::http::issues::update_issue_status,
        crate::inbound::http::issues::delete_issue,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RoleSchema,
        IssueStatusSchema,
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        UserProfileResponse,
        CreateIssueRequest,
        UpdateStatusRequest,
        ReporterResponse,
        IssueResponse,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "Account profile"),
        (name = "issues", description = "Civic issue reporting and triage"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).unwrap_or_else(|| panic!("{name} schema")) {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected Object schema for {name}"),
        }
    }

    #[rstest]
    #[case("crate.domain.Error", &["code", "message", "traceId", "details"])]
    #[case("AuthResponse", &["token", "username", "email", "firstName", "lastName", "role"])]
    #[case("IssueResponse", &["id", "title", "status", "critical", "createdBy", "createdAt"])]
    fn schemas_expose_wire_fields(#[case] name: &str, #[case] expected: &[&str]) {
        let fields = object_fields(name);
        for field in expected {
            assert!(fields.iter().any(|f| f == field), "{name} lacks {field}");
        }
    }

    #[rstest]
    fn user_profile_omits_password_hash() {
        let fields = object_fields("UserProfileResponse");
        assert!(!fields.iter().any(|f| f.to_lowercase().contains("password")));
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }

    #[rstest]
    #[case("/api/auth/register")]
    #[case("/api/users/me")]
    #[case("/api/issues/{id}/status")]
    #[case("/health/ready")]
    fn paths_are_documented(#[case] path: &str) {
        assert!(ApiDoc::openapi().paths.paths.contains_key(path));
    }
}
