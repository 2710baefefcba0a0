//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Username and email uniqueness are enforced by unique constraints; a
//! violation is mapped back to the matching duplicate error by constraint
//! name so concurrent registrations cannot both succeed.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    AreaCode, EmailAddress, PasswordHash, PersonName, Role, User, UserId, UserProfile, Username,
};

use super::diesel_error_mapping::{log_diesel_error, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const USERNAME_CONSTRAINT: &str = "users_username_key";
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

fn diesel_error(error: DieselError) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Map insert failures, translating unique violations into duplicates.
fn insert_error(error: DieselError) -> UserPersistenceError {
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &error {
        log_diesel_error(&error);
        return match info.constraint_name() {
            Some(USERNAME_CONSTRAINT) => UserPersistenceError::duplicate_username(),
            Some(EMAIL_CONSTRAINT) => UserPersistenceError::duplicate_email(),
            _ => UserPersistenceError::query("unexpected unique constraint violation"),
        };
    }
    diesel_error(error)
}

/// Convert a database row into a domain user.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let corrupt = |err: crate::domain::FieldValidationError| {
        UserPersistenceError::query(format!("stored user row is invalid: {err}"))
    };
    let profile = UserProfile::new(
        PersonName::new(row.first_name).map_err(corrupt)?,
        PersonName::new(row.last_name).map_err(corrupt)?,
        Username::new(row.username).map_err(corrupt)?,
        EmailAddress::new(row.email).map_err(corrupt)?,
        AreaCode::new(row.area_code).map_err(corrupt)?,
    );
    let role: Role = row.role.parse().map_err(corrupt)?;
    Ok(User::new(
        UserId::from_uuid(row.id),
        profile,
        role,
        PasswordHash::new(row.password_hash),
        row.created_at,
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let profile = user.profile();
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            first_name: profile.first_name().as_str(),
            last_name: profile.last_name().as_str(),
            username: profile.username().as_str(),
            email: profile.email().as_str(),
            password_hash: user.password_hash().as_str(),
            area_code: profile.area_code().as_str(),
            role: user.role().as_str(),
            created_at: user.created_at(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(insert_error)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = users::table
            .filter(users::username.eq(username.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn exists_by_username(&self, username: &Username) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::select(exists(
            users::table.filter(users::username.eq(username.as_str())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(diesel_error)
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::select(exists(users::table.filter(users::email.eq(email.as_str()))))
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion and error mapping.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    #[derive(Debug)]
    struct ConstraintViolation(Option<&'static str>);

    impl diesel::result::DatabaseErrorInformation for ConstraintViolation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("users")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.0
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn violation(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(ConstraintViolation(constraint)))
    }

    fn unique_violation(constraint: Option<&'static str>) -> DieselError {
        violation(DatabaseErrorKind::UniqueViolation, constraint)
    }

    fn row() -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            username: "ada".to_owned(),
            email: "ada@example.org".to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            area_code: "N1".to_owned(),
            role: "ADMIN".to_owned(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[case(Some(USERNAME_CONSTRAINT), UserPersistenceError::DuplicateUsername)]
    #[case(Some(EMAIL_CONSTRAINT), UserPersistenceError::DuplicateEmail)]
    fn unique_violations_map_by_constraint(
        #[case] constraint: Option<&'static str>,
        #[case] expected: UserPersistenceError,
    ) {
        assert_eq!(insert_error(unique_violation(constraint)), expected);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("users_pkey"))]
    fn unknown_constraint_is_a_query_error(#[case] constraint: Option<&'static str>) {
        assert_eq!(
            insert_error(unique_violation(constraint)),
            UserPersistenceError::query("unexpected unique constraint violation")
        );
    }

    #[rstest]
    #[case(DatabaseErrorKind::ForeignKeyViolation)]
    #[case(DatabaseErrorKind::CheckViolation)]
    fn other_violations_on_a_known_constraint_are_not_duplicates(
        #[case] kind: DatabaseErrorKind,
    ) {
        assert_eq!(
            insert_error(violation(kind, Some(USERNAME_CONSTRAINT))),
            UserPersistenceError::query("database error")
        );
    }

    #[rstest]
    fn closed_connection_during_insert_is_a_connection_error() {
        assert_eq!(
            insert_error(violation(DatabaseErrorKind::ClosedConnection, None)),
            UserPersistenceError::connection("database connection error")
        );
    }

    #[rstest]
    fn pool_errors_map_to_connection() {
        let err = pool_error(PoolError::checkout("refused"));
        assert_eq!(err, UserPersistenceError::connection("refused"));
    }

    #[rstest]
    fn row_converts_to_domain_user() {
        let source = row();
        let id = source.id;
        let user = row_to_user(source).expect("valid row");
        assert_eq!(user.id().as_uuid(), &id);
        assert_eq!(user.role(), Role::Admin);
        assert_eq!(user.username().as_str(), "ada");
    }

    #[rstest]
    fn unknown_role_is_reported_as_corrupt_row() {
        let mut source = row();
        source.role = "ROOT".to_owned();
        assert!(matches!(
            row_to_user(source),
            Err(UserPersistenceError::Query { .. })
        ));
    }
}
