//! Outbound adapters implementing the driven domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: process-local adapters for running without a database.
//!
//! Adapters only translate between domain types and their storage
//! representation; report and expense rules live in the domain.

pub mod memory;
pub mod persistence;
