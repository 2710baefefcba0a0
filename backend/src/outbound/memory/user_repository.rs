//! In-process [`UserRepository`] adapter.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, Username};

/// User store backed by a mutex-guarded map keyed by username.
///
/// The uniqueness checks and the insert happen under one lock, so concurrent
/// registrations for the same username or email cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing users, e.g. administrators provisioned
    /// out of band.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let map = users
            .into_iter()
            .map(|user| (user.username().as_str().to_owned(), user))
            .collect();
        Self {
            users: Mutex::new(map),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.lock()?;
        if users.contains_key(user.username().as_str()) {
            return Err(UserPersistenceError::duplicate_username());
        }
        if users.values().any(|existing| existing.email() == user.email()) {
            return Err(UserPersistenceError::duplicate_email());
        }
        users.insert(user.username().as_str().to_owned(), user.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.get(username.as_str()).cloned())
    }

    async fn exists_by_username(&self, username: &Username) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.contains_key(username.as_str()))
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.values().any(|user| user.email() == email))
    }
}
