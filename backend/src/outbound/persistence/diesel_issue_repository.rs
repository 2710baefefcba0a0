//! PostgreSQL-backed `IssueRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{IssuePersistenceError, IssueRepository};
use crate::domain::{
    FieldValidationError, Issue, IssueCategory, IssueDescription, IssueFilter, IssueId,
    IssueRecord, IssueStatus, IssueTitle, Username,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{IssueRow, IssueStatusUpdate, NewIssueRow};
use super::pool::{DbPool, PoolError};
use super::schema::issues;

/// Diesel-backed implementation of the `IssueRepository` port.
#[derive(Clone)]
pub struct DieselIssueRepository {
    pool: DbPool,
}

impl DieselIssueRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> IssuePersistenceError {
    map_pool_error(error, IssuePersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> IssuePersistenceError {
    map_diesel_error(
        error,
        IssuePersistenceError::query,
        IssuePersistenceError::connection,
    )
}

fn row_to_issue(row: IssueRow) -> Result<Issue, IssuePersistenceError> {
    let corrupt = |err: FieldValidationError| {
        IssuePersistenceError::query(format!("stored issue row is invalid: {err}"))
    };
    Ok(Issue::from(IssueRecord {
        id: IssueId::from_uuid(row.id),
        title: IssueTitle::new(row.title).map_err(corrupt)?,
        description: IssueDescription::new(row.description).map_err(corrupt)?,
        category: IssueCategory::new(row.category).map_err(corrupt)?,
        location: row.location,
        critical: row.critical,
        status: row.status.parse().map_err(corrupt)?,
        created_by: Username::new(row.created_by).map_err(corrupt)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn rows_to_issues(rows: Vec<IssueRow>) -> Result<Vec<Issue>, IssuePersistenceError> {
    rows.into_iter().map(row_to_issue).collect()
}

#[async_trait]
impl IssueRepository for DieselIssueRepository {
    async fn insert(&self, issue: &Issue) -> Result<(), IssuePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewIssueRow {
            id: *issue.id().as_uuid(),
            title: issue.title().as_str(),
            description: issue.description().as_str(),
            category: issue.category().as_str(),
            location: issue.location(),
            critical: issue.is_critical(),
            status: issue.status().as_str(),
            created_by: issue.created_by().as_str(),
            created_at: issue.created_at(),
            updated_at: issue.updated_at(),
        };

        diesel::insert_into(issues::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_id(&self, id: IssueId) -> Result<Option<Issue>, IssuePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = issues::table
            .find(*id.as_uuid())
            .select(IssueRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_issue).transpose()
    }

    async fn list(&self, filter: &IssueFilter) -> Result<Vec<Issue>, IssuePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let mut query = issues::table
            .select(IssueRow::as_select())
            .order((issues::created_at.desc(), issues::id.desc()))
            .into_boxed();
        if let Some(status) = filter.status {
            query = query.filter(issues::status.eq(status.as_str()));
        }
        if let Some(category) = &filter.category {
            query = query.filter(issues::category.eq(category.as_str().to_owned()));
        }

        let rows = query.load(&mut conn).await.map_err(diesel_error)?;
        rows_to_issues(rows)
    }

    async fn update_status(
        &self,
        id: IssueId,
        status: IssueStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Issue>, IssuePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = diesel::update(issues::table.find(*id.as_uuid()))
            .set(&IssueStatusUpdate {
                status: status.as_str(),
                updated_at,
            })
            .returning(IssueRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_issue).transpose()
    }

    async fn delete(&self, id: IssueId) -> Result<bool, IssuePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let deleted = diesel::delete(issues::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(deleted > 0)
    }
}
