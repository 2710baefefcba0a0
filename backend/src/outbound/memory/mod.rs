//! In-process repository adapters.
//!
//! Used when no database URL is configured (local development) and by the
//! integration tests. State lives only as long as the process.

mod issue_repository;
mod user_repository;

pub use issue_repository::InMemoryIssueRepository;
pub use user_repository::InMemoryUserRepository;
