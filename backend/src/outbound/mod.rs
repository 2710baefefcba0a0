//! Outbound adapters implementing the domain ports.
//!
//! - **memory**: process-local repositories for development and tests
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **security**: Argon2 password hashing and JWT bearer tokens
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business rules.

pub mod memory;
pub mod persistence;
pub mod security;
