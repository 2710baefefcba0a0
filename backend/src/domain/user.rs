//! User data model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::clock::to_stored_precision;
use super::text::{FieldValidationError, define_text_newtype};

/// Validation errors returned when parsing a [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserIdError {
    #[error("user id must not be empty")]
    Empty,
    #[error("user id must be a valid UUID")]
    Invalid,
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserIdError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(UserIdError::Empty);
        }
        if id.trim() != id {
            return Err(UserIdError::Invalid);
        }
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| UserIdError::Invalid)
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

define_text_newtype! {
    /// Unique login handle. Trimmed; compared exactly.
    pub struct Username => "username";
}

define_text_newtype! {
    /// Given or family name shown on the profile.
    pub struct PersonName => "name";
}

define_text_newtype! {
    /// Free-form code for the municipal area a resident belongs to.
    pub struct AreaCode => "areaCode";
}

/// Email address, trimmed and lower-cased so uniqueness is case-insensitive.
///
/// No format validation is applied beyond requiring a non-blank value.
///
/// # Examples
/// ```
/// use civicflow_backend::domain::EmailAddress;
///
/// let email = EmailAddress::new("  Ada@Example.ORG ").unwrap();
/// assert_eq!(email.as_str(), "ada@example.org");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate, trim and normalise an email address.
    pub fn new(value: impl AsRef<str>) -> Result<Self, FieldValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(FieldValidationError::blank("email"));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// Borrow the normalised address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = FieldValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Authorisation tier attached to every account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Regular resident. Every registration receives this role.
    #[default]
    User,
    /// Administrator allowed to manage issue lifecycles.
    Admin,
}

impl Role {
    /// Upper-case wire and storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }

    /// Whether the role grants administrative operations.
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = FieldValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            other => Err(FieldValidationError::unsupported("role", other)),
        }
    }
}

/// Encoded password hash in PHC string format.
///
/// The value is opaque to the domain; only the password hasher port
/// interprets it. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a hasher or loaded from storage.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Borrow the encoded form.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Validated profile fields supplied at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    first_name: PersonName,
    last_name: PersonName,
    username: Username,
    email: EmailAddress,
    area_code: AreaCode,
}

impl UserProfile {
    /// Bundle already validated profile fields.
    pub fn new(
        first_name: PersonName,
        last_name: PersonName,
        username: Username,
        email: EmailAddress,
        area_code: AreaCode,
    ) -> Self {
        Self {
            first_name,
            last_name,
            username,
            email,
            area_code,
        }
    }

    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn area_code(&self) -> &AreaCode {
        &self.area_code
    }
}

/// Registered account.
///
/// ## Invariants
/// - `username` and `email` are unique across all users; the user store
///   enforces this on insert.
/// - `password_hash` never holds clear text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    profile: UserProfile,
    role: Role,
    password_hash: PasswordHash,
    created_at: DateTime<Utc>,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(
        id: UserId,
        profile: UserProfile,
        role: Role,
        password_hash: PasswordHash,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            profile,
            role,
            password_hash,
            created_at,
        }
    }

    /// Build a freshly registered user with a random id and the default role.
    pub fn register(profile: UserProfile, password_hash: PasswordHash) -> Self {
        Self::new(
            UserId::random(),
            profile,
            Role::User,
            password_hash,
            to_stored_precision(Utc::now()),
        )
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn username(&self) -> &Username {
        self.profile.username()
    }

    pub fn email(&self) -> &EmailAddress {
        self.profile.email()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Return a copy of the user with a different role.
    ///
    /// No endpoint promotes users; storage adapters and tests use this to
    /// model administrators provisioned out of band.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}
