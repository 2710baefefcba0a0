//! Diesel table definitions for the PostgreSQL schema.
//!
//! Kept in sync by hand with `backend/migrations`. These definitions are
//! internal to the persistence adapters and never leak into the domain.

diesel::table! {
    /// Registered accounts.
    ///
    /// `username` and `email` carry unique constraints named
    /// `users_username_key` and `users_email_key`; adapters map violations of
    /// each to a distinct duplicate error.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        first_name -> Varchar,
        last_name -> Varchar,
        /// Login handle, unique.
        username -> Varchar,
        /// Lower-cased email address, unique.
        email -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Varchar,
        area_code -> Varchar,
        /// `USER` or `ADMIN`.
        role -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Reported civic issues.
    issues (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        title -> Varchar,
        description -> Text,
        category -> Varchar,
        location -> Nullable<Varchar>,
        critical -> Bool,
        /// `OPEN`, `IN_PROGRESS`, `RESOLVED` or `REJECTED`.
        status -> Varchar,
        /// Reporter's username; references `users.username`.
        created_by -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, issues);
