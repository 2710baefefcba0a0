//! Driving port for registration and login use-cases.
//!
//! Inbound adapters call it to create accounts and authenticate credentials
//! without knowing the backing store, hasher or token format. Handler tests
//! substitute a mock instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{AuthError, AuthSession, LoginCredentials, Registration, User, Username};

/// Domain use-case port for account authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a `USER` account and return a session for it.
    async fn register(&self, registration: Registration) -> Result<AuthSession, AuthError>;

    /// Check credentials and return a session for the matching account.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, AuthError>;

    /// Load the account named by a verified token.
    async fn current_user(&self, username: &Username) -> Result<User, AuthError>;
}
