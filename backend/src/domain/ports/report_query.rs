//! Driving port for monthly report queries.
//!
//! Inbound adapters call this port with raw request values; implementations
//! validate them, consult the clock and resolve the report.

use async_trait::async_trait;

use crate::domain::{Error, ReportPeriod, ReportSnapshot, UserId, aggregate};

/// Domain use-case port for fetching a user's monthly report.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportQuery: Send + Sync {
    /// Report of `user_id` for `month` of `year`.
    async fn fetch_report(
        &self,
        user_id: UserId,
        year: i32,
        month: u32,
    ) -> Result<ReportSnapshot, Error>;
}

/// Fixture query returning an empty report for any valid period.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReportQuery;

#[async_trait]
impl ReportQuery for FixtureReportQuery {
    async fn fetch_report(
        &self,
        user_id: UserId,
        year: i32,
        month: u32,
    ) -> Result<ReportSnapshot, Error> {
        let period = ReportPeriod::new(year, month)?;
        Ok(aggregate(user_id, period, &[]))
    }
}
