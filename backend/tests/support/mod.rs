//! Shared wiring for HTTP integration tests.
//!
//! Each test crate builds the real Actix app over in-memory adapters so the
//! full request path (middleware, extractors, services, repositories) runs
//! without a database.

#![allow(dead_code, unused_macros, reason = "each test crate uses a different subset")]

use std::sync::Arc;

use actix_web::web;
use civicflow_backend::domain::ports::PasswordHasher;
use civicflow_backend::domain::{
    AccountService, AreaCode, EmailAddress, IssueService, PersonName, Role, User, UserProfile,
    Username,
};
use civicflow_backend::inbound::http::state::{HttpState, HttpStatePorts};
use civicflow_backend::outbound::memory::{InMemoryIssueRepository, InMemoryUserRepository};
use civicflow_backend::outbound::security::{
    Argon2PasswordHasher, JwtConfig, JwtTokenIssuer, SigningKey,
};
use serde_json::{Value, json};

pub const PASSWORD: &str = "correct horse battery staple";

/// Cheap Argon2 parameters so tests stay fast.
pub fn hasher() -> Arc<Argon2PasswordHasher> {
    Arc::new(Argon2PasswordHasher::with_params(1024, 1, 1).expect("argon2 params"))
}

/// Pre-registered account with a real password hash.
pub fn account(username: &str, role: Role) -> User {
    let profile = UserProfile::new(
        PersonName::new("Grace").expect("first name"),
        PersonName::new("Hopper").expect("last name"),
        Username::new(username).expect("username"),
        EmailAddress::new(format!("{username}@council.example")).expect("email"),
        AreaCode::new("E2").expect("area code"),
    );
    let hash = hasher().hash(PASSWORD).expect("hash password");
    User::register(profile, hash).with_role(role)
}

/// HTTP state over fresh in-memory repositories seeded with `users`.
pub fn state_with(users: Vec<User>) -> web::Data<HttpState> {
    let users = Arc::new(InMemoryUserRepository::with_users(users));
    let tokens = Arc::new(JwtTokenIssuer::new(
        &SigningKey::generate(),
        JwtConfig::default(),
    ));
    let issues = Arc::new(IssueService::new(
        users.clone(),
        Arc::new(InMemoryIssueRepository::new()),
    ));
    web::Data::new(HttpState::new(HttpStatePorts {
        auth: Arc::new(AccountService::new(users, hasher(), tokens.clone())),
        issues: issues.clone(),
        issues_query: issues,
        tokens,
    }))
}

pub fn registration(username: &str, email: &str) -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "username": username,
        "email": email,
        "password": PASSWORD,
        "areaCode": "N1",
    })
}

pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (
        actix_web::http::header::AUTHORIZATION,
        format!("Bearer {token}"),
    )
}

/// Build the production route table over `$state`.
macro_rules! civicflow_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state)
                .app_data(
                    actix_web::web::JsonConfig::default().error_handler(
                        civicflow_backend::inbound::http::error::json_error_handler,
                    ),
                )
                .app_data(
                    actix_web::web::QueryConfig::default().error_handler(
                        civicflow_backend::inbound::http::error::query_error_handler,
                    ),
                )
                .wrap(civicflow_backend::Trace)
                .service(
                    actix_web::web::scope("/api")
                        .service(civicflow_backend::inbound::http::auth::register)
                        .service(civicflow_backend::inbound::http::auth::login)
                        .service(civicflow_backend::inbound::http::users::current_user)
                        .service(civicflow_backend::inbound::http::issues::create_issue)
                        .service(civicflow_backend::inbound::http::issues::list_issues)
                        .service(civicflow_backend::inbound::http::issues::get_issue)
                        .service(civicflow_backend::inbound::http::issues::update_issue_status)
                        .service(civicflow_backend::inbound::http::issues::delete_issue),
                ),
        )
        .await
    };
}

/// Log in through the app and return the bearer token.
macro_rules! login_token {
    ($app:expr, $username:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({
                "username": $username,
                "password": $crate::support::PASSWORD,
            }))
            .to_request();
        let body: serde_json::Value = actix_web::test::call_and_read_body_json(&$app, req).await;
        body["token"].as_str().expect("token").to_owned()
    }};
}
