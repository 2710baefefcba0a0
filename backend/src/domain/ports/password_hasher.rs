//! Port for one-way password hashing.
//!
//! The trait is synchronous: implementations are tuned for interactive
//! logins and are called inline by the account service.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hasher adapters.
    pub enum PasswordHasherError {
        /// Hashing a new password failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Port for hashing and verifying passwords.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a clear-text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError>;

    /// Check a clear-text password against a stored hash.
    ///
    /// A mismatch is `Ok(false)`; errors are reserved for malformed hashes.
    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHasherError>;
}
