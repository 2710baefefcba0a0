//! Driving port for issue mutations.

use async_trait::async_trait;

use crate::domain::{Error, Issue, IssueDraft, IssueId, IssueStatus, Username};

/// Domain use-case port for reporting and managing issues.
///
/// `actor` is the username asserted by the caller's verified token. Admin
/// operations resolve the actor's role from the user store on every call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueCommand: Send + Sync {
    /// Report a new issue on behalf of `actor`.
    async fn create(&self, actor: &Username, draft: IssueDraft) -> Result<Issue, Error>;

    /// Move an issue to `status`. Admin only.
    async fn update_status(
        &self,
        actor: &Username,
        id: IssueId,
        status: IssueStatus,
    ) -> Result<Issue, Error>;

    /// Delete an issue. Admin only.
    async fn delete(&self, actor: &Username, id: IssueId) -> Result<(), Error>;
}
