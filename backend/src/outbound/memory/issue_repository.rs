//! In-process [`IssueRepository`] adapter.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{IssuePersistenceError, IssueRepository};
use crate::domain::{Issue, IssueFilter, IssueId, IssueStatus};

/// Issue store backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct InMemoryIssueRepository {
    issues: Mutex<HashMap<IssueId, Issue>>,
}

impl InMemoryIssueRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<IssueId, Issue>>, IssuePersistenceError> {
        self.issues
            .lock()
            .map_err(|_| IssuePersistenceError::query("issue store lock poisoned"))
    }
}

#[async_trait]
impl IssueRepository for InMemoryIssueRepository {
    async fn insert(&self, issue: &Issue) -> Result<(), IssuePersistenceError> {
        self.lock()?.insert(issue.id(), issue.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: IssueId) -> Result<Option<Issue>, IssuePersistenceError> {
        Ok(self.lock()?.get(&id).cloned())
    }

    async fn list(&self, filter: &IssueFilter) -> Result<Vec<Issue>, IssuePersistenceError> {
        let mut issues: Vec<Issue> = self
            .lock()?
            .values()
            .filter(|issue| issue.matches(filter))
            .cloned()
            .collect();
        issues.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().as_uuid().cmp(a.id().as_uuid()))
        });
        Ok(issues)
    }

    async fn update_status(
        &self,
        id: IssueId,
        status: IssueStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Issue>, IssuePersistenceError> {
        let mut issues = self.lock()?;
        Ok(issues.get_mut(&id).map(|issue| {
            issue.set_status(status, updated_at);
            issue.clone()
        }))
    }

    async fn delete(&self, id: IssueId) -> Result<bool, IssuePersistenceError> {
        Ok(self.lock()?.remove(&id).is_some())
    }
}
