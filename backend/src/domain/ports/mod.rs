//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`UserRepository`, `IssueRepository`, `PasswordHasher`,
//! `TokenIssuer`) are implemented by outbound adapters. Driving ports
//! (`AuthService`, `IssueCommand`, `IssueQuery`) are implemented by domain
//! services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_service;
mod issue_command;
mod issue_query;
mod issue_repository;
mod password_hasher;
mod token_issuer;
mod user_repository;

pub use auth_service::AuthService;
#[cfg(test)]
pub use auth_service::MockAuthService;
pub use issue_command::IssueCommand;
#[cfg(test)]
pub use issue_command::MockIssueCommand;
pub use issue_query::IssueQuery;
#[cfg(test)]
pub use issue_query::MockIssueQuery;
#[cfg(test)]
pub use issue_repository::MockIssueRepository;
pub use issue_repository::{IssuePersistenceError, IssueRepository};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{TokenError, TokenIssuer};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
