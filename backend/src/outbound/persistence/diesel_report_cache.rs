//! PostgreSQL-backed `ReportCache`.
//!
//! Snapshots are stored as JSONB in the shape the API returns, except that
//! sums are decimal strings so they survive the round trip exactly. The
//! `reports_user_period_key` unique constraint is what makes `create`
//! write-once, including across server instances.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ReportCache, ReportCacheError};
use crate::domain::{Category, CategoryCosts, ReportPeriod, ReportSnapshot, UserId};

use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{NewReportRow, ReportRow, StoredCostItem, StoredCosts};
use super::pool::{DbPool, PoolError};
use super::schema::reports;

/// Diesel implementation of the [`ReportCache`] port.
#[derive(Clone)]
pub struct DieselReportCache {
    pool: DbPool,
}

impl DieselReportCache {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ReportCacheError {
    map_pool_error(error, ReportCacheError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ReportCacheError {
    if is_unique_violation(&error) {
        return ReportCacheError::already_exists("report snapshot already stored");
    }
    map_diesel_error(error, ReportCacheError::query, ReportCacheError::connection)
}

fn month_column(month: u32) -> Result<i32, ReportCacheError> {
    i32::try_from(month).map_err(|_| ReportCacheError::query(format!("month {month} out of range")))
}

fn encode_costs(costs: &[CategoryCosts]) -> Result<serde_json::Value, ReportCacheError> {
    let stored: StoredCosts = costs
        .iter()
        .map(|group| {
            let items: Vec<StoredCostItem> =
                group.items().iter().map(StoredCostItem::from).collect();
            [(group.category().as_str().to_owned(), items)].into()
        })
        .collect();
    serde_json::to_value(stored)
        .map_err(|err| ReportCacheError::query(format!("failed to encode costs: {err}")))
}

fn decode_costs(value: serde_json::Value) -> Result<Vec<CategoryCosts>, ReportCacheError> {
    let stored: StoredCosts = serde_json::from_value(value)
        .map_err(|err| ReportCacheError::query(format!("stored costs unreadable: {err}")))?;
    stored
        .into_iter()
        .map(|group| {
            let mut entries = group.into_iter();
            let (Some((name, items)), None) = (entries.next(), entries.next()) else {
                return Err(ReportCacheError::query(
                    "stored category group must have exactly one key",
                ));
            };
            let category = Category::new(name)
                .map_err(|err| ReportCacheError::query(format!("stored category invalid: {err}")))?;
            Ok(CategoryCosts::new(
                category,
                items.into_iter().map(Into::into).collect(),
            ))
        })
        .collect()
}

fn row_to_snapshot(row: ReportRow) -> Result<ReportSnapshot, ReportCacheError> {
    let month = u32::try_from(row.month)
        .map_err(|_| ReportCacheError::query(format!("stored month {} out of range", row.month)))?;
    let period = ReportPeriod::new(row.year, month)
        .map_err(|err| ReportCacheError::query(format!("stored period invalid: {err}")))?;
    let costs = decode_costs(row.costs)?;
    Ok(ReportSnapshot::new(UserId::new(row.user_id), period, costs))
}

#[async_trait]
impl ReportCache for DieselReportCache {
    async fn find(
        &self,
        user_id: UserId,
        period: ReportPeriod,
    ) -> Result<Option<ReportSnapshot>, ReportCacheError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<ReportRow> = reports::table
            .filter(reports::user_id.eq(user_id.get()))
            .filter(reports::year.eq(period.year()))
            .filter(reports::month.eq(month_column(period.month())?))
            .select(ReportRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_snapshot).transpose()
    }

    async fn create(&self, snapshot: &ReportSnapshot) -> Result<(), ReportCacheError> {
        let costs = encode_costs(snapshot.costs())?;
        let row = NewReportRow {
            user_id: snapshot.user_id().get(),
            year: snapshot.year(),
            month: month_column(snapshot.month())?,
            costs: &costs,
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::insert_into(reports::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }
}
