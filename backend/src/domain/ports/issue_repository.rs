//! Port abstraction for issue persistence adapters and their errors.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Issue, IssueFilter, IssueId, IssueStatus};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by issue repository adapters.
    pub enum IssuePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "issue repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "issue repository query failed: {message}",
    }
}

/// Port for storing and reading reported issues.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// Persist a newly opened issue.
    async fn insert(&self, issue: &Issue) -> Result<(), IssuePersistenceError>;

    /// Fetch a single issue.
    async fn find_by_id(&self, id: IssueId) -> Result<Option<Issue>, IssuePersistenceError>;

    /// Return issues matching `filter`, newest first.
    async fn list(&self, filter: &IssueFilter) -> Result<Vec<Issue>, IssuePersistenceError>;

    /// Set the status of an issue, returning the updated issue or `None`
    /// when it does not exist.
    async fn update_status(
        &self,
        id: IssueId,
        status: IssueStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Issue>, IssuePersistenceError>;

    /// Remove an issue. Returns `false` when nothing was deleted.
    async fn delete(&self, id: IssueId) -> Result<bool, IssuePersistenceError>;
}
