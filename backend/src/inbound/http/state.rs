//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the driving ports,
//! so they can be exercised without storage.

use std::sync::Arc;

use crate::domain::ports::{
    ExpenseCommand, FixtureExpenseCommand, FixtureReportQuery, FixtureUserCommand,
    FixtureUsersQuery, ReportQuery, UserCommand, UsersQuery,
};

/// Ports behind the `/api/users` endpoints.
#[derive(Clone)]
pub struct HttpStateUserPorts {
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UsersQuery>,
}

impl Default for HttpStateUserPorts {
    fn default() -> Self {
        Self {
            users: Arc::new(FixtureUserCommand),
            users_query: Arc::new(FixtureUsersQuery),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub reports: Arc<dyn ReportQuery>,
    pub expenses: Arc<dyn ExpenseCommand>,
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UsersQuery>,
}

impl HttpState {
    /// Bundle the report and expense ports; user endpoints use fixtures.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use expense_reports::domain::ports::{FixtureExpenseCommand, FixtureReportQuery};
    /// use expense_reports::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureReportQuery), Arc::new(FixtureExpenseCommand));
    /// let _reports = state.reports.clone();
    /// ```
    pub fn new(reports: Arc<dyn ReportQuery>, expenses: Arc<dyn ExpenseCommand>) -> Self {
        Self::new_with_users(reports, expenses, HttpStateUserPorts::default())
    }

    /// Bundle every port, including the user ones.
    pub fn new_with_users(
        reports: Arc<dyn ReportQuery>,
        expenses: Arc<dyn ExpenseCommand>,
        user_ports: HttpStateUserPorts,
    ) -> Self {
        let HttpStateUserPorts { users, users_query } = user_ports;
        Self {
            reports,
            expenses,
            users,
            users_query,
        }
    }
}

impl Default for HttpState {
    /// State backed by fixture ports that touch no storage.
    fn default() -> Self {
        Self::new(Arc::new(FixtureReportQuery), Arc::new(FixtureExpenseCommand))
    }
}
