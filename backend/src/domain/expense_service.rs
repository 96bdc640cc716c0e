//! Expense recording service implementing the [`ExpenseCommand`] driving port.
//!
//! Entries may only be recorded in the current month or later. This is what
//! makes reports for earlier months safe to cache forever.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Datelike;
use mockable::Clock;
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::ports::{ExpenseCommand, ExpenseRepository, NewExpenseRequest, UserDirectory};
use crate::domain::service_support::{
    ensure_user_exists, invalid_field, map_expense_repository_error,
};
use crate::domain::{Category, CategoryRegistry, Error, ExpenseEntry, ExpenseEntryDraft, is_past};

/// Validates and stores new expense entries.
#[derive(Clone)]
pub struct ExpenseService<R, U> {
    expenses: Arc<R>,
    users: Arc<U>,
    categories: CategoryRegistry,
    clock: Arc<dyn Clock>,
}

impl<R, U> ExpenseService<R, U> {
    pub fn new(
        expenses: Arc<R>,
        users: Arc<U>,
        categories: CategoryRegistry,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            expenses,
            users,
            categories,
            clock,
        }
    }

    fn validate_category(&self, raw: String) -> Result<Category, Error> {
        Category::new(raw)
            .ok()
            .filter(|category| self.categories.allows(category))
            .ok_or_else(|| invalid_field("Category is not registered", "category", "invalid_category"))
    }
}

#[async_trait]
impl<R, U> ExpenseCommand for ExpenseService<R, U>
where
    R: ExpenseRepository,
    U: UserDirectory,
{
    async fn add_expense(&self, request: NewExpenseRequest) -> Result<ExpenseEntry, Error> {
        let NewExpenseRequest {
            user_id,
            category,
            amount,
            description,
            occurred_at,
        } = request;

        if description.trim().is_empty() {
            return Err(invalid_field(
                "Description is required",
                "description",
                "missing_parameters",
            ));
        }
        let category = self.validate_category(category)?;
        if amount < Decimal::ZERO {
            return Err(invalid_field("Sum must not be negative", "sum", "invalid_sum"));
        }
        let now = self.clock.utc();
        let occurred_at = occurred_at.unwrap_or(now);
        if is_past(occurred_at.year(), occurred_at.month(), now) {
            return Err(invalid_field(
                "Expenses cannot be recorded in a closed month",
                "date",
                "past_date_not_allowed",
            ));
        }

        ensure_user_exists(self.users.as_ref(), user_id).await?;

        let entry = ExpenseEntry::new(ExpenseEntryDraft {
            user_id,
            category,
            amount,
            description,
            occurred_at,
        })
        .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.expenses
            .insert(&entry)
            .await
            .map_err(map_expense_repository_error)?;
        info!(%user_id, category = %entry.category(), "recorded expense");
        Ok(entry)
    }
}

#[cfg(test)]
#[path = "expense_service_tests.rs"]
mod tests;
