//! HTTP inbound adapter exposing the REST endpoints.
//!
//! Handlers are thin: they parse transport input into domain types, call a
//! driving port held in [`state::HttpState`], and map results back to JSON.

pub mod auth;
pub mod bearer;
pub mod error;
pub mod health;
pub mod issues;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub(crate) mod validation;

pub use error::ApiResult;
