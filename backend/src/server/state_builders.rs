//! Builders wiring storage adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use expense_reports::domain::ports::{ExpenseRepository, ReportCache, UserDirectory};
use expense_reports::domain::{CategoryRegistry, ExpenseService, ReportService, UserService};
use expense_reports::inbound::http::state::{HttpState, HttpStateUserPorts};
use expense_reports::outbound::memory::{
    InMemoryExpenseRepository, InMemoryReportCache, InMemoryUserDirectory,
};
use expense_reports::outbound::persistence::{
    DieselExpenseRepository, DieselReportCache, DieselUserDirectory,
};

use super::{ServerConfig, Storage};

/// Report, expense and user ports sharing one set of adapters.
fn build_state<E, C, U>(
    expenses: Arc<E>,
    cache: Arc<C>,
    users: Arc<U>,
    categories: CategoryRegistry,
) -> HttpState
where
    E: ExpenseRepository + 'static,
    C: ReportCache + 'static,
    U: UserDirectory + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let reports = ReportService::new(expenses.clone(), cache, users.clone(), clock.clone());
    let command = ExpenseService::new(expenses.clone(), users.clone(), categories, clock.clone());
    let user_service = Arc::new(UserService::new(users, expenses, clock));
    HttpState::new_with_users(
        Arc::new(reports),
        Arc::new(command),
        HttpStateUserPorts {
            users: user_service.clone(),
            users_query: user_service,
        },
    )
}

/// Build the shared HTTP state for the configured storage.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let categories = config.categories.clone();
    let state = match &config.storage {
        Storage::Postgres(pool) => build_state(
            Arc::new(DieselExpenseRepository::new(pool.clone())),
            Arc::new(DieselReportCache::new(pool.clone())),
            Arc::new(DieselUserDirectory::new(pool.clone())),
            categories,
        ),
        Storage::Memory { users } => build_state(
            Arc::new(InMemoryExpenseRepository::new()),
            Arc::new(InMemoryReportCache::new()),
            Arc::new(InMemoryUserDirectory::with_users(users.iter().cloned())),
            categories,
        ),
    };
    web::Data::new(state)
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use chrono::{Datelike, Utc};
    use expense_reports::domain::ports::NewExpenseRequest;
    use expense_reports::domain::{ErrorCode, User, UserDraft, UserId};
    use rust_decimal::Decimal;

    use super::*;

    fn memory_config(users: Vec<User>) -> ServerConfig {
        ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0))).with_memory_users(users)
    }

    fn user(id: i64) -> User {
        User::new(UserDraft {
            id: UserId::new(id),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            birthday: None,
        })
        .expect("valid user")
    }

    #[tokio::test]
    async fn memory_state_shares_expenses_between_ports() {
        let state = build_http_state(&memory_config(vec![user(7)]));
        let now = Utc::now();

        state
            .expenses
            .add_expense(NewExpenseRequest {
                user_id: UserId::new(7),
                category: "food".to_owned(),
                amount: Decimal::TEN,
                description: "lunch".to_owned(),
                occurred_at: None,
            })
            .await
            .expect("expense stored");
        let report = state
            .reports
            .fetch_report(UserId::new(7), now.year(), now.month())
            .await
            .expect("report computed");

        assert_eq!(report.items_for("food").map(<[_]>::len), Some(1));
    }

    #[tokio::test]
    async fn memory_state_only_knows_seeded_users() {
        let state = build_http_state(&memory_config(Vec::new()));

        let err = state
            .reports
            .fetch_report(UserId::new(1), 2024, 1)
            .await
            .expect_err("user unknown");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn memory_state_totals_expenses_per_user() {
        let state = build_http_state(&memory_config(vec![user(7)]));
        state
            .expenses
            .add_expense(NewExpenseRequest {
                user_id: UserId::new(7),
                category: "food".to_owned(),
                amount: Decimal::new(1250, 2),
                description: "lunch".to_owned(),
                occurred_at: None,
            })
            .await
            .expect("expense stored");

        let summary = state
            .users_query
            .user_summary(UserId::new(7))
            .await
            .expect("summary computed");

        assert_eq!(summary.total, Decimal::new(1250, 2));
        assert_eq!(summary.user.last_name(), "Lovelace");
    }

    #[tokio::test]
    async fn memory_state_registers_new_users() {
        let state = build_http_state(&memory_config(Vec::new()));

        state
            .users
            .create_user(UserDraft {
                id: UserId::new(3),
                first_name: "Grace".to_owned(),
                last_name: "Hopper".to_owned(),
                birthday: None,
            })
            .await
            .expect("user created");
        let report = state.reports.fetch_report(UserId::new(3), 2024, 1).await;

        assert!(report.is_ok());
    }
}
