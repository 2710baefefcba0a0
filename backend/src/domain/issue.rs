//! Civic issue data model.
//!
//! Issues are reported by residents and moved through their lifecycle by
//! administrators. The lifecycle imposes no transition rules: an admin may
//! set any status, including the current one.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::clock::to_stored_precision;
use super::text::{FieldValidationError, define_text_newtype};
use super::user::Username;

/// Lifecycle state of a reported issue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueStatus {
    /// Newly reported.
    #[default]
    Open,
    /// Being worked on.
    InProgress,
    /// Fixed.
    Resolved,
    /// Closed without a fix.
    Rejected,
}

impl IssueStatus {
    /// Every status in lifecycle order.
    pub const ALL: [IssueStatus; 4] = [
        IssueStatus::Open,
        IssueStatus::InProgress,
        IssueStatus::Resolved,
        IssueStatus::Rejected,
    ];

    /// Upper snake case wire and storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = FieldValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == trimmed)
            .ok_or_else(|| FieldValidationError::unsupported("status", trimmed))
    }
}

/// Stable issue identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueId(Uuid);

impl IssueId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

define_text_newtype! {
    /// Short summary of the issue.
    pub struct IssueTitle => "title";
}

define_text_newtype! {
    /// Long-form description of the issue.
    pub struct IssueDescription => "description";
}

define_text_newtype! {
    /// Free-form category such as `Infrastructure` or `Sanitation`.
    pub struct IssueCategory => "category";
}

/// Raw issue fields as received from an inbound adapter.
#[derive(Debug, Clone, Copy)]
pub struct IssueInput<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub location: Option<&'a str>,
    pub critical: bool,
}

/// Validated request to report a new issue.
///
/// ## Invariants
/// - `title`, `description` and `category` are non-blank once trimmed.
/// - `location` is `None` when absent or blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDraft {
    title: IssueTitle,
    description: IssueDescription,
    category: IssueCategory,
    location: Option<String>,
    critical: bool,
}

impl IssueDraft {
    /// Validate raw fields, reporting the first blank required one.
    pub fn try_from_input(input: IssueInput<'_>) -> Result<Self, FieldValidationError> {
        let location = input
            .location
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);
        Ok(Self {
            title: IssueTitle::new(input.title)?,
            description: IssueDescription::new(input.description)?,
            category: IssueCategory::new(input.category)?,
            location,
            critical: input.critical,
        })
    }

    pub fn title(&self) -> &IssueTitle {
        &self.title
    }

    pub fn category(&self) -> &IssueCategory {
        &self.category
    }
}

/// Reported civic issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    id: IssueId,
    title: IssueTitle,
    description: IssueDescription,
    category: IssueCategory,
    location: Option<String>,
    critical: bool,
    status: IssueStatus,
    created_by: Username,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for rebuilding an [`Issue`] from storage.
#[derive(Debug, Clone)]
pub struct IssueRecord {
    pub id: IssueId,
    pub title: IssueTitle,
    pub description: IssueDescription,
    pub category: IssueCategory,
    pub location: Option<String>,
    pub critical: bool,
    pub status: IssueStatus,
    pub created_by: Username,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<IssueRecord> for Issue {
    fn from(record: IssueRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            category: record.category,
            location: record.location,
            critical: record.critical,
            status: record.status,
            created_by: record.created_by,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl Issue {
    /// Open a new issue reported by `reporter` at `now`.
    pub fn open(draft: IssueDraft, reporter: Username, now: DateTime<Utc>) -> Self {
        let IssueDraft {
            title,
            description,
            category,
            location,
            critical,
        } = draft;
        let now = to_stored_precision(now);
        Self {
            id: IssueId::random(),
            title,
            description,
            category,
            location,
            critical,
            status: IssueStatus::Open,
            created_by: reporter,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> IssueId {
        self.id
    }

    pub fn title(&self) -> &IssueTitle {
        &self.title
    }

    pub fn description(&self) -> &IssueDescription {
        &self.description
    }

    pub fn category(&self) -> &IssueCategory {
        &self.category
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn is_critical(&self) -> bool {
        self.critical
    }

    pub fn status(&self) -> IssueStatus {
        self.status
    }

    /// Username of the resident who reported the issue.
    pub fn created_by(&self) -> &Username {
        &self.created_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Set a new status and bump `updated_at`.
    pub fn set_status(&mut self, status: IssueStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = to_stored_precision(now);
    }

    /// Whether the issue satisfies every criterion in `filter`.
    pub fn matches(&self, filter: &IssueFilter) -> bool {
        filter.status.is_none_or(|status| status == self.status)
            && filter
                .category
                .as_ref()
                .is_none_or(|category| category == &self.category)
    }
}

/// Optional criteria for listing issues. Empty means "all issues".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    pub status: Option<IssueStatus>,
    pub category: Option<IssueCategory>,
}
