//! Internal helpers shared by the expense and report services.

use serde_json::json;

use crate::domain::ports::{ExpenseRepositoryError, UserDirectory, UserDirectoryError};
use crate::domain::{Error, UserId};

pub(crate) fn map_expense_repository_error(error: ExpenseRepositoryError) -> Error {
    match error {
        ExpenseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("expense repository unavailable: {message}"))
        }
        ExpenseRepositoryError::Query { message } => {
            Error::internal(format!("expense repository error: {message}"))
        }
    }
}

pub(crate) fn map_user_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserDirectoryError::Query { message } => {
            Error::internal(format!("user directory error: {message}"))
        }
        UserDirectoryError::AlreadyExists { message } => {
            Error::conflict(format!("user already exists: {message}"))
        }
    }
}

/// Fail with `NotFound` unless `user_id` is registered.
pub(crate) async fn ensure_user_exists<U>(users: &U, user_id: UserId) -> Result<(), Error>
where
    U: UserDirectory + ?Sized,
{
    let exists = users
        .exists(user_id)
        .await
        .map_err(map_user_directory_error)?;
    if exists {
        Ok(())
    } else {
        Err(user_not_found(user_id))
    }
}

/// `NotFound` for an unregistered user, with the `user_not_found` code.
pub(crate) fn user_not_found(user_id: UserId) -> Error {
    Error::not_found(format!("user {user_id} not found")).with_details(json!({
        "userId": user_id,
        "code": "user_not_found",
    }))
}

/// `InvalidRequest` carrying the offending field and a machine-readable code.
pub(crate) fn invalid_field(message: impl Into<String>, field: &str, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockUserDirectory;

    #[rstest]
    #[case(UserDirectoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserDirectoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(UserDirectoryError::already_exists("user 7"), ErrorCode::Conflict)]
    fn maps_directory_errors(#[case] error: UserDirectoryError, #[case] expected: ErrorCode) {
        assert_eq!(map_user_directory_error(error).code(), expected);
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let mut users = MockUserDirectory::new();
        users.expect_exists().times(1).return_once(|_| Ok(false));

        let err = ensure_user_exists(&users, UserId::new(404))
            .await
            .expect_err("unknown user");

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(
            err.details().and_then(|d| d.get("code")).and_then(|c| c.as_str()),
            Some("user_not_found")
        );
    }
}
