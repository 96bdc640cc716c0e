//! Driving port for reading registered users.
//!
//! Inbound adapters use this port to list users and to fetch one user with
//! their spending total, without touching persistence directly.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{Error, User, UserDraft, UserId, UserSummary};

/// Domain use-case port for user lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every registered user, ordered by id.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// `user_id` with the sum of all their expenses.
    ///
    /// # Errors
    ///
    /// `NotFound` when the user is not registered.
    async fn user_summary(&self, user_id: UserId) -> Result<UserSummary, Error>;
}

/// Fixture query knowing a single user with no expenses.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUsersQuery;

fn fixture_user() -> Result<User, Error> {
    User::new(UserDraft {
        id: UserId::new(1),
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        birthday: None,
    })
    .map_err(|err| Error::internal(format!("invalid fixture user: {err}")))
}

#[async_trait]
impl UsersQuery for FixtureUsersQuery {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        Ok(vec![fixture_user()?])
    }

    async fn user_summary(&self, user_id: UserId) -> Result<UserSummary, Error> {
        let user = fixture_user()?;
        if user.id() != user_id {
            return Err(Error::not_found(format!("user {user_id} not found")));
        }
        Ok(UserSummary {
            user,
            total: Decimal::ZERO,
        })
    }
}
