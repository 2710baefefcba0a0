//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{
    MockAuthService, MockIssueCommand, MockIssueQuery, TokenError, TokenIssuer,
};
use crate::domain::{AccountService, IssueService, Role, User, Username};
use crate::domain::test_support;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{InMemoryIssueRepository, InMemoryUserRepository};
use crate::outbound::security::{Argon2PasswordHasher, JwtConfig, JwtTokenIssuer, SigningKey};

/// Token accepted by [`FixedTokenIssuer`]; it resolves to `ada`.
pub const VALID_TOKEN: &str = "valid-token";

/// Token issuer that accepts only [`VALID_TOKEN`].
pub struct FixedTokenIssuer;

impl TokenIssuer for FixedTokenIssuer {
    fn issue(&self, username: &Username) -> Result<String, TokenError> {
        Ok(format!("token-for-{username}"))
    }

    fn verify(&self, token: &str) -> Result<Username, TokenError> {
        if token == VALID_TOKEN {
            Username::new("ada").map_err(|err| TokenError::invalid(err.to_string()))
        } else {
            Err(TokenError::invalid("unknown token"))
        }
    }
}

/// State whose only working port is [`FixedTokenIssuer`].
pub fn fixed_token_state() -> web::Data<HttpState> {
    web::Data::new(HttpState::new(HttpStatePorts {
        auth: Arc::new(MockAuthService::new()),
        issues: Arc::new(MockIssueCommand::new()),
        issues_query: Arc::new(MockIssueQuery::new()),
        tokens: Arc::new(FixedTokenIssuer),
    }))
}

/// Fully wired state backed by in-memory adapters.
pub struct Harness {
    pub state: web::Data<HttpState>,
    pub users: Arc<InMemoryUserRepository>,
    pub tokens: Arc<JwtTokenIssuer>,
}

impl Harness {
    /// Store a user directly and return a bearer token for it.
    pub async fn seed(&self, username: &str, role: Role) -> String {
        use crate::domain::ports::UserRepository;

        let user: User = test_support::user(username, role);
        self.users.insert(&user).await.expect("seed user");
        self.tokens.issue(user.username()).expect("issue token")
    }
}

/// Build a [`Harness`] with cheap Argon2 parameters.
pub fn harness() -> Harness {
    let users = Arc::new(InMemoryUserRepository::new());
    let tokens = Arc::new(JwtTokenIssuer::new(
        &SigningKey::generate(),
        JwtConfig::default(),
    ));
    let hasher = Arc::new(Argon2PasswordHasher::with_params(1024, 1, 1).expect("argon2 params"));
    let issues = Arc::new(IssueService::new(
        users.clone(),
        Arc::new(InMemoryIssueRepository::new()),
    ));
    let state = web::Data::new(HttpState::new(HttpStatePorts {
        auth: Arc::new(AccountService::new(users.clone(), hasher, tokens.clone())),
        issues: issues.clone(),
        issues_query: issues,
        tokens: tokens.clone(),
    }));
    Harness {
        state,
        users,
        tokens,
    }
}
