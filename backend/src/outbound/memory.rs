//! Process-local adapters used when no database is configured.
//!
//! The adapters hold their data behind `tokio` locks and honour the same
//! contracts as the PostgreSQL ones: expenses come back in insertion order,
//! and both the report cache and the user directory reject a second write
//! for the same key.

use std::collections::{BTreeMap, HashMap, btree_map, hash_map};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::domain::ports::{
    ExpenseRepository, ExpenseRepositoryError, ReportCache, ReportCacheError, UserDirectory,
    UserDirectoryError,
};
use crate::domain::{ExpenseEntry, ReportPeriod, ReportSnapshot, User, UserId};

/// Append-only expense log.
#[derive(Debug, Default)]
pub struct InMemoryExpenseRepository {
    entries: RwLock<Vec<ExpenseEntry>>,
}

impl InMemoryExpenseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl ExpenseRepository for InMemoryExpenseRepository {
    async fn insert(&self, entry: &ExpenseEntry) -> Result<(), ExpenseRepositoryError> {
        self.entries.write().await.push(entry.clone());
        Ok(())
    }

    async fn find_by_user_and_range(
        &self,
        user_id: UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ExpenseEntry>, ExpenseRepositoryError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|entry| entry.user_id() == user_id)
            .filter(|entry| start <= entry.occurred_at() && entry.occurred_at() <= end)
            .cloned()
            .collect())
    }

    async fn total_for_user(&self, user_id: UserId) -> Result<Decimal, ExpenseRepositoryError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|entry| entry.user_id() == user_id)
            .map(ExpenseEntry::amount)
            .sum())
    }
}

/// Write-once snapshot store keyed by (user, period).
#[derive(Debug, Default)]
pub struct InMemoryReportCache {
    snapshots: RwLock<HashMap<(UserId, ReportPeriod), ReportSnapshot>>,
}

impl InMemoryReportCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snapshots.
    pub async fn len(&self) -> usize {
        self.snapshots.read().await.len()
    }
}

fn snapshot_key(snapshot: &ReportSnapshot) -> Result<(UserId, ReportPeriod), ReportCacheError> {
    let period = ReportPeriod::new(snapshot.year(), snapshot.month())
        .map_err(|err| ReportCacheError::query(err.to_string()))?;
    Ok((snapshot.user_id(), period))
}

#[async_trait]
impl ReportCache for InMemoryReportCache {
    async fn find(
        &self,
        user_id: UserId,
        period: ReportPeriod,
    ) -> Result<Option<ReportSnapshot>, ReportCacheError> {
        Ok(self.snapshots.read().await.get(&(user_id, period)).cloned())
    }

    async fn create(&self, snapshot: &ReportSnapshot) -> Result<(), ReportCacheError> {
        let key = snapshot_key(snapshot)?;
        match self.snapshots.write().await.entry(key) {
            hash_map::Entry::Occupied(_) => Err(ReportCacheError::already_exists(format!(
                "user {}, {}-{:02}",
                key.0,
                key.1.year(),
                key.1.month()
            ))),
            hash_map::Entry::Vacant(slot) => {
                slot.insert(snapshot.clone());
                Ok(())
            }
        }
    }
}

/// Registered users keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<BTreeMap<UserId, User>>,
}

impl InMemoryUserDirectory {
    /// Directory pre-populated with `users`.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().map(|user| (user.id(), user)).collect()),
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn exists(&self, user_id: UserId) -> Result<bool, UserDirectoryError> {
        Ok(self.users.read().await.contains_key(&user_id))
    }

    async fn create(&self, user: &User) -> Result<(), UserDirectoryError> {
        match self.users.write().await.entry(user.id()) {
            btree_map::Entry::Occupied(_) => Err(UserDirectoryError::already_exists(format!(
                "user {}",
                user.id()
            ))),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(())
            }
        }
    }

    async fn find(&self, user_id: UserId) -> Result<Option<User>, UserDirectoryError> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserDirectoryError> {
        Ok(self.users.read().await.values().cloned().collect())
    }
}
