//! Issue reporting and lifecycle service.
//!
//! Implements the [`IssueCommand`] and [`IssueQuery`] driving ports. The
//! caller's role is read from the user store on each admin operation, so a
//! promotion or demotion takes effect without reissuing tokens.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    IssueCommand, IssuePersistenceError, IssueQuery, IssueRepository, UserPersistenceError,
    UserRepository,
};
use crate::domain::{Error, Issue, IssueDraft, IssueFilter, IssueId, IssueStatus, User, Username};

/// Issue service implementing the issue driving ports.
pub struct IssueService<U: ?Sized, I: ?Sized> {
    users: Arc<U>,
    issues: Arc<I>,
}

impl<U: ?Sized, I: ?Sized> IssueService<U, I> {
    /// Create a new service with the given repositories.
    pub fn new(users: Arc<U>, issues: Arc<I>) -> Self {
        Self { users, issues }
    }
}

impl<U, I> IssueService<U, I>
where
    U: UserRepository + ?Sized,
    I: IssueRepository + ?Sized,
{
    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            other => Error::internal(format!("user repository error: {other}")),
        }
    }

    fn map_issue_error(error: IssuePersistenceError) -> Error {
        match error {
            IssuePersistenceError::Connection { message } => {
                Error::service_unavailable(format!("issue repository unavailable: {message}"))
            }
            IssuePersistenceError::Query { message } => {
                Error::internal(format!("issue repository error: {message}"))
            }
        }
    }

    fn issue_not_found(id: IssueId) -> Error {
        Error::not_found(format!("issue {id} not found"))
    }

    async fn resolve_actor(&self, actor: &Username) -> Result<User, Error> {
        self.users
            .find_by_username(actor)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::unauthorized("Authenticated user no longer exists"))
    }

    async fn require_admin(&self, actor: &Username) -> Result<User, Error> {
        let user = self.resolve_actor(actor).await?;
        if !user.role().is_admin() {
            return Err(Error::forbidden("only administrators can manage issues"));
        }
        Ok(user)
    }
}

#[async_trait]
impl<U, I> IssueCommand for IssueService<U, I>
where
    U: UserRepository + ?Sized,
    I: IssueRepository + ?Sized,
{
    async fn create(&self, actor: &Username, draft: IssueDraft) -> Result<Issue, Error> {
        let reporter = self.resolve_actor(actor).await?;
        let issue = Issue::open(draft, reporter.username().clone(), Utc::now());
        self.issues
            .insert(&issue)
            .await
            .map_err(Self::map_issue_error)?;
        Ok(issue)
    }

    async fn update_status(
        &self,
        actor: &Username,
        id: IssueId,
        status: IssueStatus,
    ) -> Result<Issue, Error> {
        self.require_admin(actor).await?;
        self.issues
            .update_status(id, status, Utc::now())
            .await
            .map_err(Self::map_issue_error)?
            .ok_or_else(|| Self::issue_not_found(id))
    }

    async fn delete(&self, actor: &Username, id: IssueId) -> Result<(), Error> {
        self.require_admin(actor).await?;
        let deleted = self
            .issues
            .delete(id)
            .await
            .map_err(Self::map_issue_error)?;
        if deleted {
            Ok(())
        } else {
            Err(Self::issue_not_found(id))
        }
    }
}

#[async_trait]
impl<U, I> IssueQuery for IssueService<U, I>
where
    U: UserRepository + ?Sized,
    I: IssueRepository + ?Sized,
{
    async fn list(&self, filter: &IssueFilter) -> Result<Vec<Issue>, Error> {
        self.issues
            .list(filter)
            .await
            .map_err(Self::map_issue_error)
    }

    async fn get(&self, id: IssueId) -> Result<Issue, Error> {
        self.issues
            .find_by_id(id)
            .await
            .map_err(Self::map_issue_error)?
            .ok_or_else(|| Self::issue_not_found(id))
    }
}

#[cfg(test)]
#[path = "issue_service_tests.rs"]
mod tests;
