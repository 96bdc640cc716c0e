//! Internal Diesel row structs.
//!
//! Rows never leave the persistence layer; repositories convert them to and
//! from domain types.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::CostItem;

use super::schema::{expenses, reports, users};

/// Row read from the expenses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = expenses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ExpenseRow {
    pub user_id: i64,
    pub category: String,
    pub amount: Decimal,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = expenses)]
pub(crate) struct NewExpenseRow<'a> {
    pub user_id: i64,
    pub category: &'a str,
    pub amount: Decimal,
    pub description: &'a str,
    pub occurred_at: DateTime<Utc>,
}

/// Row read from the reports table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reports)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReportRow {
    pub user_id: i64,
    pub year: i32,
    pub month: i32,
    pub costs: serde_json::Value,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reports)]
pub(crate) struct NewReportRow<'a> {
    pub user_id: i64,
    pub year: i32,
    pub month: i32,
    pub costs: &'a serde_json::Value,
}

/// One report item inside the `reports.costs` JSONB column.
///
/// `sum` uses `Decimal`'s own serde form, a decimal string, so a stored
/// snapshot reads back equal to the one that was computed. Numeric sums are
/// still accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct StoredCostItem {
    pub sum: Decimal,
    pub description: String,
    pub day: u32,
}

impl From<&CostItem> for StoredCostItem {
    fn from(item: &CostItem) -> Self {
        Self {
            sum: item.sum,
            description: item.description.clone(),
            day: item.day,
        }
    }
}

impl From<StoredCostItem> for CostItem {
    fn from(item: StoredCostItem) -> Self {
        Self {
            sum: item.sum,
            description: item.description,
            day: item.day,
        }
    }
}

/// `reports.costs`: one single-key object per category, in report order.
pub(crate) type StoredCosts = Vec<BTreeMap<String, Vec<StoredCostItem>>>;

/// Row read from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birthday: Option<NaiveDate>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: i64,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub birthday: Option<NaiveDate>,
}
