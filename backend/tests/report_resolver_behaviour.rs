//! Behavioural tests for report resolution over the in-memory adapters.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use futures::future::join_all;
use expense_reports::domain::ports::{ExpenseRepository, ReportCache};
use expense_reports::domain::{
    Category, ExpenseEntry, ExpenseEntryDraft, ReportError, ReportPeriod, ReportResolver, UserId,
};
use expense_reports::outbound::memory::{InMemoryExpenseRepository, InMemoryReportCache};
use rstest::{fixture, rstest};
use rust_decimal::Decimal;
use serde_json::json;

type Resolver = ReportResolver<InMemoryExpenseRepository, InMemoryReportCache>;

struct World {
    expenses: Arc<InMemoryExpenseRepository>,
    cache: Arc<InMemoryReportCache>,
    resolver: Resolver,
}

impl World {
    async fn record(&self, user: i64, category: &str, sum: i64, description: &str, at: DateTime<Utc>) {
        let entry = ExpenseEntry::new(ExpenseEntryDraft {
            user_id: UserId::new(user),
            category: Category::new(category).expect("valid category"),
            amount: Decimal::from(sum),
            description: description.to_owned(),
            occurred_at: at,
        })
        .expect("valid entry");
        self.expenses.insert(&entry).await.expect("insert succeeds");
    }
}

#[fixture]
fn world() -> World {
    let expenses = Arc::new(InMemoryExpenseRepository::new());
    let cache = Arc::new(InMemoryReportCache::new());
    let resolver = ReportResolver::new(expenses.clone(), cache.clone());
    World {
        expenses,
        cache,
        resolver,
    }
}

fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[rstest]
#[tokio::test]
async fn january_food_report_lists_entries_by_category(world: World) {
    world.record(7, "food", 10, "groceries", at(2025, 1, 3)).await;
    world.record(7, "food", 5, "bakery", at(2025, 1, 20)).await;
    world.record(8, "health", 99, "someone else", at(2025, 1, 4)).await;

    let report = world
        .resolver
        .get_report(UserId::new(7), 2025, 1, at(2025, 3, 1))
        .await
        .expect("report resolves");

    let body = serde_json::to_value(&report).expect("report serialises");
    assert_eq!(
        body,
        json!({
            "userId": 7,
            "year": 2025,
            "month": 1,
            "costs": [
                { "food": [
                    { "sum": 10.0, "description": "groceries", "day": 3 },
                    { "sum": 5.0, "description": "bakery", "day": 20 }
                ] },
                { "health": [] },
                { "housing": [] },
                { "sports": [] },
                { "education": [] }
            ]
        })
    );
}

#[rstest]
#[tokio::test]
async fn closed_month_is_served_from_cache_after_first_request(world: World) {
    let now = at(2025, 3, 1);
    world.record(7, "food", 10, "groceries", at(2025, 1, 3)).await;

    let first = world
        .resolver
        .get_report(UserId::new(7), 2025, 1, now)
        .await
        .expect("first resolution");
    world.record(7, "food", 1, "late arrival", at(2025, 1, 30)).await;
    let second = world
        .resolver
        .get_report(UserId::new(7), 2025, 1, now)
        .await
        .expect("second resolution");

    assert_eq!(first, second);
    assert_eq!(world.cache.len().await, 1);
}

#[rstest]
#[tokio::test]
async fn current_month_reflects_new_entries_and_is_never_cached(world: World) {
    let now = at(2025, 1, 25);
    world.record(7, "food", 10, "groceries", at(2025, 1, 3)).await;

    let before = world
        .resolver
        .get_report(UserId::new(7), 2025, 1, now)
        .await
        .expect("first resolution");
    world.record(7, "food", 4, "coffee", at(2025, 1, 24)).await;
    let after = world
        .resolver
        .get_report(UserId::new(7), 2025, 1, now)
        .await
        .expect("second resolution");

    assert_eq!(before.items_for("food").map(<[_]>::len), Some(1));
    assert_eq!(after.items_for("food").map(<[_]>::len), Some(2));
    let period = ReportPeriod::new(2025, 1).expect("valid period");
    assert_eq!(
        world.cache.find(UserId::new(7), period).await.expect("lookup"),
        None
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_cold_requests_store_one_snapshot(world: World) {
    world.record(3, "sports", 20, "climbing", at(2024, 6, 9)).await;
    let now = at(2024, 8, 1);

    let handles = (0..8).map(|_| {
        let resolver = world.resolver.clone();
        tokio::spawn(async move { resolver.get_report(UserId::new(3), 2024, 6, now).await })
    });
    let reports: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("task joins").expect("report resolves"))
        .collect();

    assert_eq!(world.cache.len().await, 1);
    assert!(reports.windows(2).all(|pair| pair[0] == pair[1]));
}

#[rstest]
#[tokio::test]
async fn month_bounds_are_inclusive_and_exclusive_of_neighbours(world: World) {
    let period = ReportPeriod::new(2024, 2).expect("valid period");
    let (start, end) = period.bounds();
    world.record(5, "housing", 1, "first instant", start).await;
    world.record(5, "housing", 2, "last instant", end).await;
    world
        .record(5, "housing", 3, "january", start - chrono::Duration::nanoseconds(1))
        .await;
    world
        .record(5, "housing", 4, "march", end + chrono::Duration::nanoseconds(1))
        .await;

    let report = world
        .resolver
        .get_report(UserId::new(5), 2024, 2, at(2024, 6, 1))
        .await
        .expect("report resolves");

    let descriptions: Vec<_> = report
        .items_for("housing")
        .expect("housing present")
        .iter()
        .map(|item| item.description.as_str())
        .collect();
    assert_eq!(descriptions, ["first instant", "last instant"]);
    let days: Vec<_> = report
        .items_for("housing")
        .expect("housing present")
        .iter()
        .map(|item| item.day)
        .collect();
    assert_eq!(days, [1, 29]);
}

#[rstest]
#[tokio::test]
async fn december_closes_when_the_year_turns(world: World) {
    world.record(9, "education", 30, "course", at(2024, 12, 31)).await;

    world
        .resolver
        .get_report(UserId::new(9), 2024, 12, at(2024, 12, 31))
        .await
        .expect("open month resolves");
    assert_eq!(world.cache.len().await, 0);

    world
        .resolver
        .get_report(UserId::new(9), 2024, 12, at(2025, 1, 1))
        .await
        .expect("closed month resolves");
    assert_eq!(world.cache.len().await, 1);
}

#[rstest]
#[case(0)]
#[case(13)]
#[tokio::test]
async fn invalid_month_touches_nothing(world: World, #[case] month: u32) {
    let err = world
        .resolver
        .get_report(UserId::new(1), 2024, month, at(2025, 1, 1))
        .await
        .expect_err("month rejected");

    assert_eq!(
        err,
        ReportError::InvalidMonth {
            month: i64::from(month)
        }
    );
    assert_eq!(world.cache.len().await, 0);
}
