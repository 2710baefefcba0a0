//! Diesel row structs for reading and writing tables.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{issues, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub area_code: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub area_code: &'a str,
    pub role: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the issues table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = issues)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IssueRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: Option<String>,
    pub critical: bool,
    pub status: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating issue records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = issues)]
pub(crate) struct NewIssueRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub location: Option<&'a str>,
    pub critical: bool,
    pub status: &'a str,
    pub created_by: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied when an administrator moves an issue.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = issues)]
pub(crate) struct IssueStatusUpdate<'a> {
    pub status: &'a str,
    pub updated_at: DateTime<Utc>,
}
