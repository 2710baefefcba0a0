//! Authentication primitives: credentials, registrations and auth errors.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use zeroize::Zeroizing;

use super::text::FieldValidationError;
use super::user::{AreaCode, EmailAddress, PersonName, User, UserProfile, Username};
use super::Error;

/// Message shared by every credential failure so callers cannot tell an
/// unknown username from a wrong password.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

fn require_password(password: &str) -> Result<Zeroizing<String>, FieldValidationError> {
    if password.trim().is_empty() {
        return Err(FieldValidationError::blank("password"));
    }
    Ok(Zeroizing::new(password.to_owned()))
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` must not be blank but retains caller-provided whitespace to
///   avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use civicflow_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("admin", "password").unwrap();
/// assert_eq!(creds.username().as_str(), "admin");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, FieldValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            password: require_password(password)?,
        })
    }

    /// Username suitable for user lookups.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password string provided by the caller.
    /// Clear-text password, wiped from memory when the registration drops.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Raw registration fields as received from an inbound adapter.
///
/// A role is deliberately absent: every registration creates a `USER`.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationInput<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub area_code: &'a str,
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    profile: UserProfile,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate every field, reporting the first blank one.
    ///
    /// Fields are checked in form order so clients get a stable answer.
    pub fn try_from_input(input: RegistrationInput<'_>) -> Result<Self, FieldValidationError> {
        let first_name = PersonName::new(input.first_name)
            .map_err(|_| FieldValidationError::blank("firstName"))?;
        let last_name = PersonName::new(input.last_name)
            .map_err(|_| FieldValidationError::blank("lastName"))?;
        let username = Username::new(input.username)?;
        let email = EmailAddress::new(input.email)?;
        let password = require_password(input.password)?;
        let area_code = AreaCode::new(input.area_code)?;

        Ok(Self {
            profile: UserProfile::new(first_name, last_name, username, email, area_code),
            password,
        })
    }

    /// Validated profile for the account being created.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Split into the profile and the clear-text password.
    pub fn into_parts(self) -> (UserProfile, Zeroizing<String>) {
        (self.profile, self.password)
    }
}

/// Result of a successful register or login call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    token: String,
    user: User,
}

impl AuthSession {
    /// Pair a freshly issued token with the user it was issued for.
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// Signed bearer token for the session's user.
    pub fn token(&self) -> &str {
        self.token.as_str()
    }

    /// Account the token authenticates.
    pub fn user(&self) -> &User {
        &self.user
    }
}

/// Typed failures raised by the authentication use cases.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Another account already holds the requested username.
    #[error("Username already taken")]
    DuplicateUsername,
    /// Another account already holds the requested email address.
    #[error("Email already registered")]
    DuplicateEmail,
    /// Unknown username or mismatched password.
    #[error("Invalid username or password")]
    InvalidCredentials,
    /// A verified token names a user that no longer exists.
    #[error("Authenticated user no longer exists")]
    UnknownUser,
    /// A collaborator (user store) could not be reached.
    #[error("authentication backend unavailable: {message}")]
    Unavailable { message: String },
    /// A collaborator failed unexpectedly.
    #[error("authentication failed: {message}")]
    Internal { message: String },
}

impl AuthError {
    /// Build an [`AuthError::Unavailable`]; surfaces as 503.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Build an [`AuthError::Internal`]; surfaces as a redacted 500.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<AuthError> for Error {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::DuplicateUsername => Error::conflict(value.to_string())
                .for_field("username", "duplicate_username"),
            AuthError::DuplicateEmail => {
                Error::conflict(value.to_string()).for_field("email", "duplicate_email")
            }
            AuthError::InvalidCredentials => Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)
                .with_reason("invalid_credentials"),
            AuthError::UnknownUser => Error::unauthorized(value.to_string()),
            AuthError::Unavailable { message } => Error::service_unavailable(message),
            AuthError::Internal { message } => Error::internal(message),
        }
    }
}
