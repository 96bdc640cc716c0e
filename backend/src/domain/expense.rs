//! Expense entries recorded by users.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;

use super::{Category, UserId};

/// Validation errors raised when building an [`ExpenseEntry`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpenseValidationError {
    #[error("expense description must not be empty")]
    EmptyDescription,
    #[error("expense amount must not be negative, got {amount}")]
    NegativeAmount { amount: Decimal },
}

/// Unvalidated input for [`ExpenseEntry::new`].
#[derive(Debug, Clone)]
pub struct ExpenseEntryDraft {
    pub user_id: UserId,
    pub category: Category,
    pub amount: Decimal,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
}

/// A single immutable expense.
///
/// ## Invariants
/// - `amount` is non-negative.
/// - `description` is non-empty once trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseEntry {
    user_id: UserId,
    category: Category,
    amount: Decimal,
    description: String,
    occurred_at: DateTime<Utc>,
}

impl ExpenseEntry {
    /// Validate a draft and build the entry.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use expense_reports::domain::{Category, ExpenseEntry, ExpenseEntryDraft, UserId};
    /// use rust_decimal::Decimal;
    ///
    /// let entry = ExpenseEntry::new(ExpenseEntryDraft {
    ///     user_id: UserId::new(7),
    ///     category: Category::new("food").expect("valid category"),
    ///     amount: Decimal::new(1050, 2),
    ///     description: "groceries".to_owned(),
    ///     occurred_at: Utc.with_ymd_and_hms(2025, 1, 3, 12, 0, 0).unwrap(),
    /// })
    /// .expect("valid entry");
    /// assert_eq!(entry.day_of_month(), 3);
    /// ```
    pub fn new(draft: ExpenseEntryDraft) -> Result<Self, ExpenseValidationError> {
        let ExpenseEntryDraft {
            user_id,
            category,
            amount,
            description,
            occurred_at,
        } = draft;

        if description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }
        if amount < Decimal::ZERO {
            return Err(ExpenseValidationError::NegativeAmount { amount });
        }

        Ok(Self {
            user_id,
            category,
            amount,
            description,
            occurred_at,
        })
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Day of month (1-31) on which the expense occurred, in UTC.
    pub fn day_of_month(&self) -> u32 {
        self.occurred_at.day()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn draft() -> ExpenseEntryDraft {
        ExpenseEntryDraft {
            user_id: UserId::new(7),
            category: Category::new("food").expect("valid category"),
            amount: Decimal::new(10, 0),
            description: "lunch".to_owned(),
            occurred_at: Utc
                .with_ymd_and_hms(2025, 1, 31, 23, 59, 59)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[rstest]
    fn accepts_valid_draft(draft: ExpenseEntryDraft) {
        let entry = ExpenseEntry::new(draft).expect("valid entry");
        assert_eq!(entry.day_of_month(), 31);
        assert_eq!(entry.amount(), Decimal::new(10, 0));
    }

    #[rstest]
    fn accepts_zero_amount(mut draft: ExpenseEntryDraft) {
        draft.amount = Decimal::ZERO;
        assert!(ExpenseEntry::new(draft).is_ok());
    }

    #[rstest]
    fn rejects_negative_amount(mut draft: ExpenseEntryDraft) {
        draft.amount = Decimal::new(-1, 0);
        let err = ExpenseEntry::new(draft).expect_err("negative amount");
        assert!(matches!(err, ExpenseValidationError::NegativeAmount { .. }));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn rejects_blank_description(mut draft: ExpenseEntryDraft, #[case] description: &str) {
        draft.description = description.to_owned();
        assert_eq!(
            ExpenseEntry::new(draft),
            Err(ExpenseValidationError::EmptyDescription)
        );
    }
}
