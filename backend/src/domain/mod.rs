//! Domain primitives, report computation and the services behind the API.
//!
//! Purpose: keep expense and report rules free of transport and storage
//! concerns. Inbound adapters talk to the driving ports in [`ports`];
//! outbound adapters implement the driven ones.
//!
//! Public surface:
//! - `ExpenseEntry`, `Category`, `CategoryRegistry`: recorded expenses.
//! - `ReportPeriod`, `is_past`: calendar months and the past/open classifier.
//! - `aggregate`, `ReportSnapshot`: report computation and its wire shape.
//! - `ReportResolver`: read-through caching of closed months.
//! - `User`, `UserSummary`: registered users and their spending totals.
//! - `ReportService`, `ExpenseService`, `UserService`: driving port
//!   implementations.
//! - `Error`, `ErrorCode`: transport-agnostic failure payload.

pub mod aggregator;
pub mod category;
pub mod error;
pub mod expense;
pub mod expense_service;
pub mod period;
pub mod ports;
pub mod report;
pub mod report_error;
pub mod report_resolver;
pub mod report_service;
mod service_support;
pub mod user;
pub mod user_service;

pub use self::aggregator::aggregate;
pub use self::category::{CanonicalCategory, Category, CategoryRegistry, CategoryValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::expense::{ExpenseEntry, ExpenseEntryDraft, ExpenseValidationError};
pub use self::expense_service::ExpenseService;
pub use self::period::{ReportPeriod, is_past};
pub use self::report::{CategoryCosts, CostItem, ReportSnapshot};
pub use self::report_error::ReportError;
pub use self::report_resolver::ReportResolver;
pub use self::report_service::ReportService;
pub use self::user::{MAX_NAME_LEN, User, UserDraft, UserId, UserSummary, UserValidationError};
pub use self::user_service::UserService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use expense_reports::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such user"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
