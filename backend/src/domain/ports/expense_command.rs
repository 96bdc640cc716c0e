//! Driving port for recording expenses.
//!
//! HTTP handlers hand over the raw request values; the implementation
//! validates them against the category registry and the current month before
//! anything reaches the expense repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{Category, Error, ExpenseEntry, ExpenseEntryDraft, UserId};

/// Request to record one expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpenseRequest {
    /// Owner of the expense.
    pub user_id: UserId,
    /// Category name as supplied by the caller, validated by the service.
    pub category: String,
    pub amount: Decimal,
    pub description: String,
    /// When the expense happened. `None` means "now".
    pub occurred_at: Option<DateTime<Utc>>,
}

/// Use-case port for adding expense entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExpenseCommand: Send + Sync {
    /// Validate and store a new entry, returning it as persisted.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` for a blank description, unknown category, negative
    ///   amount, or a date in an already closed month.
    /// - `NotFound` when the user does not exist.
    /// - `ServiceUnavailable` when storage cannot be reached.
    async fn add_expense(&self, request: NewExpenseRequest) -> Result<ExpenseEntry, Error>;
}

/// Fixture command that validates the shape of the entry and stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureExpenseCommand;

#[async_trait]
impl ExpenseCommand for FixtureExpenseCommand {
    async fn add_expense(&self, request: NewExpenseRequest) -> Result<ExpenseEntry, Error> {
        let category = Category::new(request.category)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        ExpenseEntry::new(ExpenseEntryDraft {
            user_id: request.user_id,
            category,
            amount: request.amount,
            description: request.description,
            occurred_at: request.occurred_at.unwrap_or_else(Utc::now),
        })
        .map_err(|err| Error::invalid_request(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    fn request(category: &str) -> NewExpenseRequest {
        NewExpenseRequest {
            user_id: UserId::new(1),
            category: category.to_owned(),
            amount: Decimal::new(250, 2),
            description: "coffee".to_owned(),
            occurred_at: None,
        }
    }

    #[tokio::test]
    async fn fixture_command_echoes_entry() {
        let entry = FixtureExpenseCommand
            .add_expense(request("food"))
            .await
            .expect("fixture accepts entry");
        assert_eq!(entry.description(), "coffee");
        assert_eq!(entry.category().as_str(), "food");
    }

    #[tokio::test]
    async fn fixture_command_rejects_malformed_category() {
        let err = FixtureExpenseCommand
            .add_expense(request("Not A Category"))
            .await
            .expect_err("malformed category");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
