//! User registration and lookup, implementing the [`UserCommand`] and
//! [`UsersQuery`] driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    ExpenseRepository, UserCommand, UserDirectory, UserDirectoryError, UsersQuery,
};
use crate::domain::service_support::{
    invalid_field, map_expense_repository_error, map_user_directory_error, user_not_found,
};
use crate::domain::{Error, User, UserDraft, UserId, UserSummary, UserValidationError};

/// Registers users and reports their spending totals.
#[derive(Clone)]
pub struct UserService<U, E> {
    users: Arc<U>,
    expenses: Arc<E>,
    clock: Arc<dyn Clock>,
}

impl<U, E> UserService<U, E> {
    pub fn new(users: Arc<U>, expenses: Arc<E>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            expenses,
            clock,
        }
    }
}

fn map_validation_error(error: UserValidationError) -> Error {
    let message = error.to_string();
    match error {
        UserValidationError::EmptyFirstName => {
            invalid_field(message, "first_name", "missing_parameters")
        }
        UserValidationError::EmptyLastName => {
            invalid_field(message, "last_name", "missing_parameters")
        }
        UserValidationError::FirstNameTooLong { .. } => {
            invalid_field(message, "first_name", "name_too_long")
        }
        UserValidationError::LastNameTooLong { .. } => {
            invalid_field(message, "last_name", "name_too_long")
        }
    }
}

#[async_trait]
impl<U, E> UserCommand for UserService<U, E>
where
    U: UserDirectory,
    E: ExpenseRepository,
{
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error> {
        let user = User::new(draft).map_err(map_validation_error)?;
        let today = self.clock.utc().date_naive();
        if user.birthday().is_some_and(|birthday| birthday > today) {
            return Err(invalid_field(
                "Birthday cannot be in the future",
                "birthday",
                "invalid_birthday",
            ));
        }

        let user_id = user.id();
        match self.users.create(&user).await {
            Ok(()) => {
                info!(%user_id, "registered user");
                Ok(user)
            }
            Err(UserDirectoryError::AlreadyExists { .. }) => {
                Err(Error::conflict(format!("user {user_id} already exists"))
                    .with_details(json!({
                        "userId": user_id,
                        "code": "user_already_exists",
                    })))
            }
            Err(err) => Err(map_user_directory_error(err)),
        }
    }
}

#[async_trait]
impl<U, E> UsersQuery for UserService<U, E>
where
    U: UserDirectory,
    E: ExpenseRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list().await.map_err(map_user_directory_error)
    }

    async fn user_summary(&self, user_id: UserId) -> Result<UserSummary, Error> {
        let user = self
            .users
            .find(user_id)
            .await
            .map_err(map_user_directory_error)?
            .ok_or_else(|| user_not_found(user_id))?;
        let total = self
            .expenses
            .total_for_user(user_id)
            .await
            .map_err(map_expense_repository_error)?;
        Ok(UserSummary { user, total })
    }
}
