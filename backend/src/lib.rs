//! Expense recording and monthly report service.
//!
//! Layout follows a hexagonal split: [`domain`] holds the rules and ports,
//! [`inbound`] the actix-web adapter, [`outbound`] the PostgreSQL and
//! in-memory adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::{RequestTrace, TraceId};
