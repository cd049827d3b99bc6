//! Travel booking backend: customers, flights, bookings, guest bookings and
//! travel agent records over a relational store.
//!
//! The crate follows a ports-and-adapters layout:
//! - [`domain`]: entities, validation and services behind driving ports.
//! - [`inbound`]: the actix-web REST adapter.
//! - [`outbound`]: PostgreSQL (Diesel) and in-memory repository adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
