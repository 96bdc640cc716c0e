//! Port for the write-once report cache.
//!
//! The cache stores at most one [`ReportSnapshot`] per (user, year, month).
//! Uniqueness is enforced by the backing store itself, so concurrent writers
//! racing on the same key see exactly one success and
//! [`ReportCacheError::AlreadyExists`] everywhere else.

use async_trait::async_trait;

use crate::domain::{ReportPeriod, ReportSnapshot, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by report cache adapters.
    pub enum ReportCacheError {
        /// Cache connection could not be established.
        Connection { message: String } => "report cache connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "report cache query failed: {message}",
        /// A snapshot for the key is already stored.
        AlreadyExists { message: String } => "report already cached: {message}",
    }
}

/// Port for storing and reading immutable report snapshots.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportCache: Send + Sync {
    /// Stored snapshot for `user_id` and `period`, if any.
    async fn find(
        &self,
        user_id: UserId,
        period: ReportPeriod,
    ) -> Result<Option<ReportSnapshot>, ReportCacheError>;

    /// Store `snapshot` under its own key.
    ///
    /// Never overwrites: an existing entry yields
    /// [`ReportCacheError::AlreadyExists`] and leaves the stored value intact.
    async fn create(&self, snapshot: &ReportSnapshot) -> Result<(), ReportCacheError>;
}

/// Fixture cache that never holds anything and accepts every write.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReportCache;

#[async_trait]
impl ReportCache for FixtureReportCache {
    async fn find(
        &self,
        _user_id: UserId,
        _period: ReportPeriod,
    ) -> Result<Option<ReportSnapshot>, ReportCacheError> {
        Ok(None)
    }

    async fn create(&self, _snapshot: &ReportSnapshot) -> Result<(), ReportCacheError> {
        Ok(())
    }
}
