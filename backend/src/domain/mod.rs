//! Domain primitives, ports and services.
//!
//! Purpose: define strongly typed entities for accounts and civic issues,
//! the ports adapters implement, and the services that orchestrate them.
//! Keep types transport agnostic and document invariants in each type's
//! Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Role and friends: account model.
//! - Issue, IssueStatus and friends: civic issue model.
//! - AccountService / IssueService: driving port implementations.

pub mod account_service;
pub mod auth;
mod clock;
pub mod error;
pub mod issue;
pub mod issue_service;
pub mod ports;
mod text;
pub mod trace_id;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::account_service::AccountService;
pub use self::auth::{
    AuthError, AuthSession, INVALID_CREDENTIALS_MESSAGE, LoginCredentials, Registration,
    RegistrationInput,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::issue::{
    Issue, IssueCategory, IssueDescription, IssueDraft, IssueFilter, IssueId, IssueInput,
    IssueRecord, IssueStatus, IssueTitle,
};
pub use self::issue_service::IssueService;
pub use self::text::FieldValidationError;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    AreaCode, EmailAddress, PasswordHash, PersonName, Role, User, UserId, UserIdError,
    UserProfile, Username,
};

