//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use civicflow_backend::domain::ports::TokenIssuer;
use civicflow_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) tokens: Arc<dyn TokenIssuer>,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration that keeps state in memory.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self {
            bind_addr,
            tokens,
            db_pool: None,
        }
    }

    /// Back the user and issue repositories with PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
