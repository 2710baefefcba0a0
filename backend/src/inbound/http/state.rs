//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` so they depend only
//! on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AuthService, IssueCommand, IssueQuery, TokenIssuer};

/// Parameter object bundling the port implementations used by handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub auth: Arc<dyn AuthService>,
    pub issues: Arc<dyn IssueCommand>,
    pub issues_query: Arc<dyn IssueQuery>,
    pub tokens: Arc<dyn TokenIssuer>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthService>,
    pub issues: Arc<dyn IssueCommand>,
    pub issues_query: Arc<dyn IssueQuery>,
    /// Verifies bearer tokens for [`super::bearer::AuthenticatedUser`].
    pub tokens: Arc<dyn TokenIssuer>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use civicflow_backend::domain::{AccountService, IssueService};
    /// use civicflow_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use civicflow_backend::outbound::memory::{InMemoryIssueRepository, InMemoryUserRepository};
    /// use civicflow_backend::outbound::security::{
    ///     Argon2PasswordHasher, JwtConfig, JwtTokenIssuer, SigningKey,
    /// };
    ///
    /// let users = Arc::new(InMemoryUserRepository::new());
    /// let tokens = Arc::new(JwtTokenIssuer::new(&SigningKey::generate(), JwtConfig::default()));
    /// let issues = Arc::new(IssueService::new(
    ///     users.clone(),
    ///     Arc::new(InMemoryIssueRepository::new()),
    /// ));
    /// let state = HttpState::new(HttpStatePorts {
    ///     auth: Arc::new(AccountService::new(
    ///         users,
    ///         Arc::new(Argon2PasswordHasher::new()),
    ///         tokens.clone(),
    ///     )),
    ///     issues: issues.clone(),
    ///     issues_query: issues,
    ///     tokens,
    /// });
    /// let _auth = state.auth.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            auth,
            issues,
            issues_query,
            tokens,
        } = ports;
        Self {
            auth,
            issues,
            issues_query,
            tokens,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
