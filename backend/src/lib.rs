//! CivicFlow backend: resident accounts and civic issue reporting.
//!
//! The crate follows a ports-and-adapters layout. [`domain`] owns the model,
//! the port traits and the services; [`inbound`] translates HTTP requests
//! into port calls; [`outbound`] implements the driven ports against
//! PostgreSQL, in-process memory and the password/token primitives.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
