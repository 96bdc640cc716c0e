//! Port for expense entry persistence.
//!
//! Entries are append-only: adapters insert them and read them back by user
//! and time range, never updating or deleting.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{ExpenseEntry, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by expense repository adapters.
    pub enum ExpenseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "expense repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "expense repository query failed: {message}",
    }
}

/// Port for storing and reading expense entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// Persist a validated entry.
    async fn insert(&self, entry: &ExpenseEntry) -> Result<(), ExpenseRepositoryError>;

    /// Entries of `user_id` whose `occurred_at` lies in `[start, end]`.
    ///
    /// Both bounds are inclusive. Results come back in storage (insertion)
    /// order so that reports list items the way they were recorded.
    async fn find_by_user_and_range(
        &self,
        user_id: UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ExpenseEntry>, ExpenseRepositoryError>;

    /// Sum of every amount recorded by `user_id`; zero when there are none.
    async fn total_for_user(&self, user_id: UserId) -> Result<Decimal, ExpenseRepositoryError>;
}

/// Fixture repository that stores nothing and finds nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureExpenseRepository;

#[async_trait]
impl ExpenseRepository for FixtureExpenseRepository {
    async fn insert(&self, _entry: &ExpenseEntry) -> Result<(), ExpenseRepositoryError> {
        Ok(())
    }

    async fn find_by_user_and_range(
        &self,
        _user_id: UserId,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<ExpenseEntry>, ExpenseRepositoryError> {
        Ok(Vec::new())
    }

    async fn total_for_user(&self, _user_id: UserId) -> Result<Decimal, ExpenseRepositoryError> {
        Ok(Decimal::ZERO)
    }
}
