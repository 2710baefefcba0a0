//! Account registration and login service.
//!
//! Implements the [`AuthService`] driving port by orchestrating the user
//! store, the password hasher and the token issuer. The service holds no
//! per-request state; every collaborator is injected at construction.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    AuthService, PasswordHasher, TokenError, TokenIssuer, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AuthError, AuthSession, LoginCredentials, PasswordHash, Registration, User, Username,
};

/// Clear text hashed once to produce the stand-in hash for unknown usernames.
const DUMMY_PASSWORD: &str = "civicflow-unknown-user";

/// Used only if the hasher cannot produce a stand-in hash. Verifying against
/// it still runs a full Argon2id computation.
const FALLBACK_DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$dW5rbm93bg$dW5rbm93bg";

/// Account service implementing the [`AuthService`] driving port.
pub struct AccountService<U: ?Sized, H: ?Sized, T: ?Sized> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    dummy_hash: OnceLock<PasswordHash>,
}

impl<U: ?Sized, H: ?Sized, T: ?Sized> AccountService<U, H, T> {
    /// Create a new service from its collaborators.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            dummy_hash: OnceLock::new(),
        }
    }
}

impl<U, H, T> AccountService<U, H, T>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenIssuer + ?Sized,
{
    fn map_user_error(error: UserPersistenceError) -> AuthError {
        match error {
            UserPersistenceError::Connection { message } => {
                AuthError::unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                AuthError::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateUsername => AuthError::DuplicateUsername,
            UserPersistenceError::DuplicateEmail => AuthError::DuplicateEmail,
        }
    }

    fn map_token_error(error: TokenError) -> AuthError {
        AuthError::internal(format!("token issuance failed: {error}"))
    }

    /// Hash verified when the username is unknown, so both login failures
    /// spend the same hashing cost. Built lazily with the injected hasher so
    /// its parameters match real account hashes.
    fn dummy_hash(&self) -> &PasswordHash {
        self.dummy_hash.get_or_init(|| {
            self.hasher.hash(DUMMY_PASSWORD).unwrap_or_else(|err| {
                warn!(error = %err, "stand-in password hash could not be generated");
                PasswordHash::new(FALLBACK_DUMMY_HASH)
            })
        })
    }

    fn open_session(&self, user: User) -> Result<AuthSession, AuthError> {
        let token = self
            .tokens
            .issue(user.username())
            .map_err(Self::map_token_error)?;
        Ok(AuthSession::new(token, user))
    }
}

#[async_trait]
impl<U, H, T> AuthService for AccountService<U, H, T>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenIssuer + ?Sized,
{
    async fn register(&self, registration: Registration) -> Result<AuthSession, AuthError> {
        let (profile, password) = registration.into_parts();

        // Username is checked first so a request colliding on both fields
        // reports the username.
        if self
            .users
            .exists_by_username(profile.username())
            .await
            .map_err(Self::map_user_error)?
        {
            return Err(AuthError::DuplicateUsername);
        }
        if self
            .users
            .exists_by_email(profile.email())
            .await
            .map_err(Self::map_user_error)?
        {
            return Err(AuthError::DuplicateEmail);
        }

        let hash = self
            .hasher
            .hash(password.as_str())
            .map_err(|err| AuthError::internal(err.to_string()))?;
        drop(password);

        let user = User::register(profile, hash);
        // The store re-checks uniqueness atomically; a concurrent
        // registration surfaces here as a duplicate error.
        self.users
            .insert(&user)
            .await
            .map_err(Self::map_user_error)?;

        self.open_session(user)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, AuthError> {
        let Some(user) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(Self::map_user_error)?
        else {
            if let Err(err) = self
                .hasher
                .verify(credentials.password(), self.dummy_hash())
            {
                debug!(error = %err, "stand-in hash verification failed");
            }
            return Err(AuthError::InvalidCredentials);
        };

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .map_err(|err| AuthError::internal(err.to_string()))?;
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        self.open_session(user)
    }

    async fn current_user(&self, username: &Username) -> Result<User, AuthError> {
        self.users
            .find_by_username(username)
            .await
            .map_err(Self::map_user_error)?
            .ok_or(AuthError::UnknownUser)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
