//! PostgreSQL-backed `ExpenseRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::sum;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use rust_decimal::Decimal;
use tracing::warn;

use crate::domain::ports::{ExpenseRepository, ExpenseRepositoryError};
use crate::domain::{Category, ExpenseEntry, ExpenseEntryDraft, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ExpenseRow, NewExpenseRow};
use super::pool::{DbPool, PoolError};
use super::schema::expenses;

/// Diesel implementation of the [`ExpenseRepository`] port.
#[derive(Clone)]
pub struct DieselExpenseRepository {
    pool: DbPool,
}

impl DieselExpenseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ExpenseRepositoryError {
    map_pool_error(error, ExpenseRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ExpenseRepositoryError {
    map_diesel_error(
        error,
        ExpenseRepositoryError::query,
        ExpenseRepositoryError::connection,
    )
}

fn row_to_entry(row: ExpenseRow) -> Result<ExpenseEntry, ExpenseRepositoryError> {
    let category = Category::new(row.category).map_err(|err| {
        warn!(user_id = row.user_id, error = %err, "stored expense has invalid category");
        ExpenseRepositoryError::query(format!("invalid stored category: {err}"))
    })?;
    ExpenseEntry::new(ExpenseEntryDraft {
        user_id: UserId::new(row.user_id),
        category,
        amount: row.amount,
        description: row.description,
        occurred_at: row.occurred_at,
    })
    .map_err(|err| ExpenseRepositoryError::query(format!("invalid stored expense: {err}")))
}

#[async_trait]
impl ExpenseRepository for DieselExpenseRepository {
    async fn insert(&self, entry: &ExpenseEntry) -> Result<(), ExpenseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewExpenseRow {
            user_id: entry.user_id().get(),
            category: entry.category().as_str(),
            amount: entry.amount(),
            description: entry.description(),
            occurred_at: entry.occurred_at(),
        };

        diesel::insert_into(expenses::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_user_and_range(
        &self,
        user_id: UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ExpenseEntry>, ExpenseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<ExpenseRow> = expenses::table
            .filter(expenses::user_id.eq(user_id.get()))
            .filter(expenses::occurred_at.between(start, end))
            .order(expenses::id.asc())
            .select(ExpenseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_entry).collect()
    }

    async fn total_for_user(&self, user_id: UserId) -> Result<Decimal, ExpenseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let total: Option<Decimal> = expenses::table
            .filter(expenses::user_id.eq(user_id.get()))
            .select(sum(expenses::amount))
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(total.unwrap_or(Decimal::ZERO))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::{fixture, rstest};
    use super::*;

    #[fixture]
    fn row() -> ExpenseRow {
        ExpenseRow {
            user_id: 7,
            category: "food".to_owned(),
            amount: Decimal::new(1999, 2),
            description: "groceries".to_owned(),
            occurred_at: Utc
                .with_ymd_and_hms(2025, 1, 3, 10, 0, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[rstest]
    fn converts_valid_row(row: ExpenseRow) {
        let entry = row_to_entry(row).expect("valid row");
        assert_eq!(entry.user_id(), UserId::new(7));
        assert_eq!(entry.amount(), Decimal::new(1999, 2));
        assert_eq!(entry.day_of_month(), 3);
    }

    #[rstest]
    fn rejects_row_with_invalid_category(mut row: ExpenseRow) {
        row.category = "Bad Name".to_owned();
        let err = row_to_entry(row).expect_err("invalid category");
        assert!(matches!(err, ExpenseRepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_checkout_failure_is_connection_error() {
        let err = pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, ExpenseRepositoryError::connection("timed out"));
    }
}
