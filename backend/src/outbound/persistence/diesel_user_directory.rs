//! PostgreSQL-backed `UserDirectory`.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{User, UserDraft, UserId};

use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel implementation of the [`UserDirectory`] port.
#[derive(Clone)]
pub struct DieselUserDirectory {
    pool: DbPool,
}

impl DieselUserDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserDirectoryError {
    map_pool_error(error, UserDirectoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserDirectoryError {
    if is_unique_violation(&error) {
        return UserDirectoryError::already_exists("user id already registered");
    }
    map_diesel_error(error, UserDirectoryError::query, UserDirectoryError::connection)
}

fn row_to_user(row: UserRow) -> Result<User, UserDirectoryError> {
    let id = row.id;
    User::new(UserDraft {
        id: UserId::new(row.id),
        first_name: row.first_name,
        last_name: row.last_name,
        birthday: row.birthday,
    })
    .map_err(|err| {
        warn!(user_id = id, error = %err, "stored user is invalid");
        UserDirectoryError::query(format!("invalid stored user: {err}"))
    })
}

#[async_trait]
impl UserDirectory for DieselUserDirectory {
    async fn exists(&self, user_id: UserId) -> Result<bool, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::select(exists(users::table.filter(users::id.eq(user_id.get()))))
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)
    }

    async fn create(&self, user: &User) -> Result<(), UserDirectoryError> {
        let row = NewUserRow {
            id: user.id().get(),
            first_name: user.first_name(),
            last_name: user.last_name(),
            birthday: user.birthday(),
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find(&self, user_id: UserId) -> Result<Option<User>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(user_id.get()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }
}
