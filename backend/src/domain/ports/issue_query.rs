//! Driving port for issue reads.

use async_trait::async_trait;

use crate::domain::{Error, Issue, IssueFilter, IssueId};

/// Domain use-case port for browsing reported issues.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueQuery: Send + Sync {
    /// Issues matching `filter`, newest first.
    async fn list(&self, filter: &IssueFilter) -> Result<Vec<Issue>, Error>;

    /// A single issue, or `not_found`.
    async fn get(&self, id: IssueId) -> Result<Issue, Error>;
}
