//! Registered users and their identity.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Longest accepted first or last name, matching the storage column.
pub const MAX_NAME_LEN: usize = 100;

/// Numeric identifier of the user who owns expense entries and reports.
///
/// Ids are chosen by the client at registration, not generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors returned by [`User::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("first name must not be empty")]
    EmptyFirstName,
    #[error("last name must not be empty")]
    EmptyLastName,
    #[error("first name must be at most {max} characters")]
    FirstNameTooLong { max: usize },
    #[error("last name must be at most {max} characters")]
    LastNameTooLong { max: usize },
}

/// Input to [`User::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub birthday: Option<NaiveDate>,
}

/// A registered user.
///
/// ## Invariants
/// - `first_name` and `last_name` are trimmed, non-empty and at most
///   [`MAX_NAME_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    first_name: String,
    last_name: String,
    birthday: Option<NaiveDate>,
}

fn validate_name(
    raw: String,
    empty: UserValidationError,
    too_long: UserValidationError,
) -> Result<String, UserValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(empty);
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(too_long);
    }
    Ok(trimmed.to_owned())
}

impl User {
    /// Validate `draft` into a user.
    ///
    /// # Examples
    /// ```
    /// use expense_reports::domain::{User, UserDraft, UserId};
    ///
    /// let user = User::new(UserDraft {
    ///     id: UserId::new(7),
    ///     first_name: " Ada ".to_owned(),
    ///     last_name: "Lovelace".to_owned(),
    ///     birthday: None,
    /// })
    /// .unwrap();
    /// assert_eq!(user.first_name(), "Ada");
    /// ```
    pub fn new(draft: UserDraft) -> Result<Self, UserValidationError> {
        let UserDraft {
            id,
            first_name,
            last_name,
            birthday,
        } = draft;
        Ok(Self {
            id,
            first_name: validate_name(
                first_name,
                UserValidationError::EmptyFirstName,
                UserValidationError::FirstNameTooLong { max: MAX_NAME_LEN },
            )?,
            last_name: validate_name(
                last_name,
                UserValidationError::EmptyLastName,
                UserValidationError::LastNameTooLong { max: MAX_NAME_LEN },
            )?,
            birthday,
        })
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn birthday(&self) -> Option<NaiveDate> {
        self.birthday
    }
}

/// A user together with the sum of every expense they recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub user: User,
    pub total: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn serialises_as_bare_integer() {
        let value = serde_json::to_value(UserId::new(7)).expect("serialises");
        assert_eq!(value, serde_json::json!(7));
    }

    #[rstest]
    fn displays_raw_value() {
        assert_eq!(UserId::from(123_123).to_string(), "123123");
    }

    fn draft(first_name: &str, last_name: &str) -> UserDraft {
        UserDraft {
            id: UserId::new(1),
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            birthday: None,
        }
    }

    #[rstest]
    fn trims_names() {
        let user = User::new(draft("  John ", "Doe\n")).expect("valid user");
        assert_eq!((user.first_name(), user.last_name()), ("John", "Doe"));
    }

    #[rstest]
    #[case(draft(" ", "Doe"), UserValidationError::EmptyFirstName)]
    #[case(draft("John", ""), UserValidationError::EmptyLastName)]
    #[case(
        draft(&"x".repeat(MAX_NAME_LEN + 1), "Doe"),
        UserValidationError::FirstNameTooLong { max: MAX_NAME_LEN }
    )]
    fn rejects_invalid_names(#[case] input: UserDraft, #[case] expected: UserValidationError) {
        assert_eq!(User::new(input), Err(expected));
    }
}
