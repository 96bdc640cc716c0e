//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between Diesel rows (`models.rs`,
//! `schema.rs`, both private) and domain types, running on `diesel-async`
//! connections from a `bb8` pool. Database errors are mapped to the port
//! error enums; driver messages are logged, not propagated.
//!
//! # Example
//!
//! ```no_run
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use expense_reports::outbound::persistence::{
//!     DbPool, DieselReportCache, PoolConfig, run_pending_migrations,
//! };
//!
//! let url = "postgres://localhost/expenses";
//! run_pending_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let cache = DieselReportCache::new(pool);
//! # let _ = cache;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_expense_repository;
mod diesel_report_cache;
mod diesel_user_directory;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_expense_repository::DieselExpenseRepository;
pub use diesel_report_cache::DieselReportCache;
pub use diesel_user_directory::DieselUserDirectory;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
