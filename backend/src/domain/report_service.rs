//! Report query service implementing the [`ReportQuery`] driving port.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{ExpenseRepository, ReportCache, ReportQuery, UserDirectory};
use crate::domain::service_support::ensure_user_exists;
use crate::domain::{Error, ReportPeriod, ReportResolver, ReportSnapshot, UserId};

/// Resolves reports for registered users at the clock's current time.
#[derive(Clone)]
pub struct ReportService<E, C, U> {
    resolver: ReportResolver<E, C>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<E, C, U> ReportService<E, C, U> {
    /// Create a service over the given repositories.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use expense_reports::domain::ReportService;
    /// # use expense_reports::domain::ports::{
    /// #     FixtureExpenseRepository, FixtureReportCache, FixtureUserDirectory,
    /// # };
    /// # use mockable::DefaultClock;
    /// let service = ReportService::new(
    ///     Arc::new(FixtureExpenseRepository),
    ///     Arc::new(FixtureReportCache),
    ///     Arc::new(FixtureUserDirectory),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(expenses: Arc<E>, cache: Arc<C>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            resolver: ReportResolver::new(expenses, cache),
            users,
            clock,
        }
    }
}

#[async_trait]
impl<E, C, U> ReportQuery for ReportService<E, C, U>
where
    E: ExpenseRepository,
    C: ReportCache,
    U: UserDirectory,
{
    async fn fetch_report(
        &self,
        user_id: UserId,
        year: i32,
        month: u32,
    ) -> Result<ReportSnapshot, Error> {
        ReportPeriod::new(year, month)?;
        ensure_user_exists(self.users.as_ref(), user_id).await?;
        let now = self.clock.utc();
        self.resolver
            .get_report(user_id, year, month, now)
            .await
            .map_err(Error::from)
    }
}
