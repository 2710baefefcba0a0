//! Builders shared by domain unit tests.

use crate::domain::{
    AreaCode, EmailAddress, PasswordHash, PersonName, Role, User, UserProfile, Username,
};

/// Build a profile whose email is derived from `username`.
pub(crate) fn profile(username: &str) -> UserProfile {
    UserProfile::new(
        PersonName::new("Ada").expect("first name"),
        PersonName::new("Lovelace").expect("last name"),
        Username::new(username).expect("username"),
        EmailAddress::new(format!("{username}@example.org")).expect("email"),
        AreaCode::new("N1").expect("area code"),
    )
}

/// Build a registered user with the given role and a fake hash.
pub(crate) fn user(username: &str, role: Role) -> User {
    User::register(profile(username), PasswordHash::new(format!("hash:{username}")))
        .with_role(role)
}

pub(crate) fn username(value: &str) -> Username {
    Username::new(value).expect("username")
}
