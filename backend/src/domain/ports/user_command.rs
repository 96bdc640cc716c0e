//! Driving port for registering users.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft};

/// Use-case port for creating user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Validate and store a new user, returning it as persisted.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` for blank or overlong names, or a birthday after
    ///   today.
    /// - `Conflict` when the id is already registered.
    /// - `ServiceUnavailable` when storage cannot be reached.
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error>;
}

/// Fixture command that validates the draft and stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserCommand;

#[async_trait]
impl UserCommand for FixtureUserCommand {
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error> {
        User::new(draft).map_err(|err| Error::invalid_request(err.to_string()))
    }
}
