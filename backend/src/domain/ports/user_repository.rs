//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, User, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Insert collided with an existing username.
        DuplicateUsername => "username is already registered",
        /// Insert collided with an existing email address.
        DuplicateEmail => "email is already registered",
    }
}

/// Port for reading and creating user accounts.
///
/// Adapters must enforce username and email uniqueness atomically in
/// [`UserRepository::insert`], reporting collisions as
/// [`UserPersistenceError::DuplicateUsername`] or
/// [`UserPersistenceError::DuplicateEmail`]. When both collide the username
/// collision wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a newly registered user.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by exact username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Whether any user holds `username`.
    async fn exists_by_username(&self, username: &Username) -> Result<bool, UserPersistenceError>;

    /// Whether any user holds `email` (already normalised to lower case).
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError>;
}
