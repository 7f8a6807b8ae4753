//! Personal dashboard backend library.
//!
//! Hexagonal layout: [`domain`] holds types, services and ports;
//! [`outbound`] implements the ports against PostgreSQL, the filesystem and
//! third-party HTTP APIs; [`inbound`] exposes the HTTP surface.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
