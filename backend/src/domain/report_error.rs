//! Failures surfaced by the report resolver.

use serde_json::json;

use super::Error;

/// Errors returned by [`crate::domain::ReportResolver::get_report`].
///
/// Cache write races are resolved internally and never appear here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    /// The requested month is outside 1-12. Not retryable.
    #[error("month must be between 1 and 12, got {month}")]
    InvalidMonth { month: i64 },
    /// The requested year cannot be represented on the calendar.
    #[error("year {year} is outside the supported calendar range")]
    InvalidYear { year: i32 },
    /// The expense store or report cache could not be read. Retryable.
    #[error("report storage unavailable: {message}")]
    StorageUnavailable { message: String },
}

impl ReportError {
    pub(crate) fn storage_unavailable(message: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
        }
    }
}

impl From<ReportError> for Error {
    fn from(value: ReportError) -> Self {
        match value {
            ReportError::InvalidMonth { month } => {
                Error::invalid_request("Month must be between 1 and 12").with_details(json!({
                    "field": "month",
                    "value": month,
                    "code": "invalid_month_range",
                }))
            }
            ReportError::InvalidYear { year } => {
                Error::invalid_request("Year is out of range").with_details(json!({
                    "field": "year",
                    "value": year,
                    "code": "invalid_year",
                }))
            }
            ReportError::StorageUnavailable { message } => {
                Error::service_unavailable(format!("report storage unavailable: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case(ReportError::InvalidMonth { month: 13 }, ErrorCode::InvalidRequest)]
    #[case(ReportError::InvalidYear { year: i32::MAX }, ErrorCode::InvalidRequest)]
    #[case(ReportError::storage_unavailable("pool timed out"), ErrorCode::ServiceUnavailable)]
    fn maps_to_domain_error_code(#[case] error: ReportError, #[case] expected: ErrorCode) {
        assert_eq!(Error::from(error).code(), expected);
    }

    #[rstest]
    fn invalid_month_carries_machine_readable_code() {
        let error = Error::from(ReportError::InvalidMonth { month: 0 });
        let code = error
            .details()
            .and_then(|details| details.get("code"))
            .and_then(serde_json::Value::as_str);
        assert_eq!(code, Some("invalid_month_range"));
    }
}
