//! Wire repositories, services and HTTP state from server configuration.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use civicflow_backend::domain::ports::{IssueRepository, PasswordHasher, UserRepository};
use civicflow_backend::domain::{AccountService, IssueService};
use civicflow_backend::inbound::http::state::{HttpState, HttpStatePorts};
use civicflow_backend::outbound::memory::{InMemoryIssueRepository, InMemoryUserRepository};
use civicflow_backend::outbound::persistence::{DbPool, DieselIssueRepository, DieselUserRepository};
use civicflow_backend::outbound::security::Argon2PasswordHasher;

use super::ServerConfig;

/// Driven ports selected for this process.
struct Repositories {
    users: Arc<dyn UserRepository>,
    issues: Arc<dyn IssueRepository>,
}

/// Use the Diesel adapters when a pool exists, the in-memory ones otherwise.
fn build_repositories_with_pool<Pool>(
    pool: Option<&Pool>,
    make_persistent: impl FnOnce(&Pool) -> Repositories,
) -> Repositories {
    match pool {
        Some(pool) => make_persistent(pool),
        None => {
            info!("no database configured; using in-memory repositories");
            Repositories {
                users: Arc::new(InMemoryUserRepository::new()),
                issues: Arc::new(InMemoryIssueRepository::new()),
            }
        }
    }
}

fn build_repositories(config: &ServerConfig) -> Repositories {
    build_repositories_with_pool(config.db_pool.as_ref(), |pool: &DbPool| Repositories {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        issues: Arc::new(DieselIssueRepository::new(pool.clone())),
    })
}

fn build_state_from(
    repos: Repositories,
    hasher: Arc<dyn PasswordHasher>,
    config: &ServerConfig,
) -> web::Data<HttpState> {
    let Repositories { users, issues } = repos;
    let auth = Arc::new(AccountService::new(
        users.clone(),
        hasher,
        config.tokens.clone(),
    ));
    let issue_service = Arc::new(IssueService::new(users, issues));

    web::Data::new(HttpState::new(HttpStatePorts {
        auth,
        issues: issue_service.clone(),
        issues_query: issue_service,
        tokens: config.tokens.clone(),
    }))
}

/// Build the shared HTTP state for the configured storage backend.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    build_state_from(
        build_repositories(config),
        Arc::new(Argon2PasswordHasher::new()),
        config,
    )
}
