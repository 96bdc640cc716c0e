//! Port for registered user records.

use async_trait::async_trait;

use crate::domain::{User, UserDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// Directory connection could not be established.
        Connection { message: String } => "user directory connection failed: {message}",
        /// Lookup or insert failed during execution.
        Query { message: String } => "user directory query failed: {message}",
        /// A user with the same id is already stored.
        AlreadyExists { message: String } => "user already exists: {message}",
    }
}

/// Storage of registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn exists(&self, user_id: UserId) -> Result<bool, UserDirectoryError>;

    /// Store a new user.
    ///
    /// Fails with [`UserDirectoryError::AlreadyExists`] rather than
    /// overwriting when the id is taken.
    async fn create(&self, user: &User) -> Result<(), UserDirectoryError>;

    async fn find(&self, user_id: UserId) -> Result<Option<User>, UserDirectoryError>;

    /// Every registered user, ordered by id.
    async fn list(&self) -> Result<Vec<User>, UserDirectoryError>;
}

/// Fixture directory in which every user exists under a placeholder name.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

fn fixture_user(user_id: UserId) -> Result<User, UserDirectoryError> {
    User::new(UserDraft {
        id: user_id,
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        birthday: None,
    })
    .map_err(|err| UserDirectoryError::query(format!("invalid fixture user: {err}")))
}

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn exists(&self, _user_id: UserId) -> Result<bool, UserDirectoryError> {
        Ok(true)
    }

    async fn create(&self, _user: &User) -> Result<(), UserDirectoryError> {
        Ok(())
    }

    async fn find(&self, user_id: UserId) -> Result<Option<User>, UserDirectoryError> {
        fixture_user(user_id).map(Some)
    }

    async fn list(&self) -> Result<Vec<User>, UserDirectoryError> {
        fixture_user(UserId::new(1)).map(|user| vec![user])
    }
}
