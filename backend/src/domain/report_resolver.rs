//! Report resolution: read-through cache for closed months, live aggregation
//! for the current one.
//!
//! A month becomes immutable once it has ended, because entries can no longer
//! be recorded in it. The first request for such a month computes the report
//! and stores it write-once; later requests return the stored snapshot.
//! Reports for the current or a future month are always computed on demand
//! and never stored.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::ports::{ExpenseRepository, ExpenseRepositoryError, ReportCache, ReportCacheError};
use super::{ReportError, ReportPeriod, ReportSnapshot, UserId, aggregate};

/// Resolves monthly reports against the expense repository and report cache.
///
/// Stateless apart from the shared port handles, so clones can serve
/// concurrent requests. Concurrent cold requests for the same closed month
/// are reconciled by the cache's uniqueness constraint: the losing writer
/// re-reads and returns the winner's snapshot.
pub struct ReportResolver<E, C> {
    expenses: Arc<E>,
    cache: Arc<C>,
}

impl<E, C> Clone for ReportResolver<E, C> {
    fn clone(&self) -> Self {
        Self {
            expenses: Arc::clone(&self.expenses),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<E, C> ReportResolver<E, C> {
    pub fn new(expenses: Arc<E>, cache: Arc<C>) -> Self {
        Self { expenses, cache }
    }
}

impl<E, C> ReportResolver<E, C>
where
    E: ExpenseRepository,
    C: ReportCache,
{
    /// Report of `user_id` for `month` of `year`, judged against
    /// `reference_now`.
    ///
    /// # Errors
    ///
    /// - [`ReportError::InvalidMonth`] / [`ReportError::InvalidYear`] when
    ///   the period cannot exist. Nothing is read.
    /// - [`ReportError::StorageUnavailable`] when the expense repository or
    ///   the cache cannot be read. A failed cache write after a successful
    ///   aggregation is logged and does not fail the request.
    pub async fn get_report(
        &self,
        user_id: UserId,
        year: i32,
        month: u32,
        reference_now: DateTime<Utc>,
    ) -> Result<ReportSnapshot, ReportError> {
        let period = ReportPeriod::new(year, month)?;

        if !period.is_past(reference_now) {
            debug!(%user_id, year, month, "computing open-month report");
            return self.compute(user_id, period).await;
        }

        if let Some(stored) = self.find_cached(user_id, period).await? {
            debug!(%user_id, year, month, "report cache hit");
            return Ok(stored);
        }

        debug!(%user_id, year, month, "report cache miss");
        let computed = self.compute(user_id, period).await?;
        match self.cache.create(&computed).await {
            Ok(()) => {
                info!(%user_id, year, month, "stored report snapshot");
                Ok(computed)
            }
            Err(ReportCacheError::AlreadyExists { .. }) => {
                self.handle_concurrent_create(user_id, period, computed).await
            }
            Err(err) => {
                warn!(%user_id, year, month, error = %err, "failed to store report snapshot");
                Ok(computed)
            }
        }
    }

    async fn compute(
        &self,
        user_id: UserId,
        period: ReportPeriod,
    ) -> Result<ReportSnapshot, ReportError> {
        let (start, end) = period.bounds();
        let entries = self
            .expenses
            .find_by_user_and_range(user_id, start, end)
            .await
            .map_err(map_expense_error)?;
        Ok(aggregate(user_id, period, &entries))
    }

    async fn find_cached(
        &self,
        user_id: UserId,
        period: ReportPeriod,
    ) -> Result<Option<ReportSnapshot>, ReportError> {
        self.cache
            .find(user_id, period)
            .await
            .map_err(map_cache_error)
    }

    /// Another request stored the snapshot first; return what it stored.
    async fn handle_concurrent_create(
        &self,
        user_id: UserId,
        period: ReportPeriod,
        computed: ReportSnapshot,
    ) -> Result<ReportSnapshot, ReportError> {
        debug!(%user_id, year = period.year(), month = period.month(), "lost report creation race");
        match self.find_cached(user_id, period).await? {
            Some(stored) => Ok(stored),
            None => {
                warn!(
                    %user_id,
                    year = period.year(),
                    month = period.month(),
                    "report reported as existing but not readable; returning computed snapshot"
                );
                Ok(computed)
            }
        }
    }
}

fn map_expense_error(error: ExpenseRepositoryError) -> ReportError {
    match error {
        ExpenseRepositoryError::Connection { message }
        | ExpenseRepositoryError::Query { message } => {
            ReportError::storage_unavailable(format!("expense repository: {message}"))
        }
    }
}

fn map_cache_error(error: ReportCacheError) -> ReportError {
    match error {
        ReportCacheError::Connection { message }
        | ReportCacheError::Query { message }
        | ReportCacheError::AlreadyExists { message } => {
            ReportError::storage_unavailable(format!("report cache: {message}"))
        }
    }
}

#[cfg(test)]
#[path = "report_resolver_tests.rs"]
mod tests;
