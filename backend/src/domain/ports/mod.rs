//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`ExpenseRepository`, `ReportCache`, `UserDirectory`) are
//! implemented by outbound adapters; driving ports (`ReportQuery`,
//! `ExpenseCommand`, `UserCommand`, `UsersQuery`) are consumed by the HTTP
//! layer.

mod macros;
pub(crate) use macros::define_port_error;

mod expense_command;
mod expense_repository;
mod report_cache;
mod report_query;
mod user_command;
mod user_directory;
mod users_query;

#[cfg(test)]
pub use expense_command::MockExpenseCommand;
pub use expense_command::{ExpenseCommand, FixtureExpenseCommand, NewExpenseRequest};
#[cfg(test)]
pub use expense_repository::MockExpenseRepository;
pub use expense_repository::{
    ExpenseRepository, ExpenseRepositoryError, FixtureExpenseRepository,
};
#[cfg(test)]
pub use report_cache::MockReportCache;
pub use report_cache::{FixtureReportCache, ReportCache, ReportCacheError};
#[cfg(test)]
pub use report_query::MockReportQuery;
pub use report_query::{FixtureReportQuery, ReportQuery};
#[cfg(test)]
pub use user_command::MockUserCommand;
pub use user_command::{FixtureUserCommand, UserCommand};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{FixtureUserDirectory, UserDirectory, UserDirectoryError};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::{FixtureUsersQuery, UsersQuery};
