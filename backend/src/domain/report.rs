//! Monthly report snapshots.
//!
//! A snapshot serialises to the stable shape shared by the HTTP API and the
//! report cache:
//!
//! ```json
//! {
//!   "userId": 7,
//!   "year": 2025,
//!   "month": 1,
//!   "costs": [
//!     { "food": [ { "sum": 10.0, "description": "lunch", "day": 3 } ] },
//!     { "health": [] }
//!   ]
//! }
//! ```

use std::fmt;

use rust_decimal::Decimal;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Category, ReportPeriod, UserId};

/// One expense as it appears inside a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostItem {
    #[serde(with = "rust_decimal::serde::float")]
    pub sum: Decimal,
    pub description: String,
    pub day: u32,
}

/// All report items of one category, serialised as `{ "<category>": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCosts {
    category: Category,
    items: Vec<CostItem>,
}

impl CategoryCosts {
    /// Group for `category` holding `items` in the given order.
    pub fn new(category: Category, items: Vec<CostItem>) -> Self {
        Self { category, items }
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn items(&self) -> &[CostItem] {
        &self.items
    }

    pub(crate) fn push(&mut self, item: CostItem) {
        self.items.push(item);
    }
}

impl Serialize for CategoryCosts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.category.as_str(), &self.items)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryCosts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SingleEntry;

        impl<'de> Visitor<'de> for SingleEntry {
            type Value = CategoryCosts;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object with exactly one category key")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let Some((category, items)) = map.next_entry::<Category, Vec<CostItem>>()? else {
                    return Err(de::Error::invalid_length(0, &self));
                };
                if map.next_key::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(2, &self));
                }
                Ok(CategoryCosts::new(category, items))
            }
        }

        deserializer.deserialize_map(SingleEntry)
    }
}

/// Computed report for one (user, year, month) key.
///
/// Past-period snapshots are immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSnapshot {
    user_id: UserId,
    year: i32,
    month: u32,
    costs: Vec<CategoryCosts>,
}

impl ReportSnapshot {
    /// Assemble a snapshot from already ordered category groups.
    pub fn new(user_id: UserId, period: ReportPeriod, costs: Vec<CategoryCosts>) -> Self {
        Self {
            user_id,
            year: period.year(),
            month: period.month(),
            costs,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Category groups in report order.
    pub fn costs(&self) -> &[CategoryCosts] {
        &self.costs
    }

    /// Items recorded under `category`, if the report lists it.
    pub fn items_for(&self, category: &str) -> Option<&[CostItem]> {
        self.costs
            .iter()
            .find(|group| group.category.as_str() == category)
            .map(CategoryCosts::items)
    }
}
