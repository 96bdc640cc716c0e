//! Shared parsing and validation helpers for the HTTP handlers.
//!
//! Every failure becomes an `InvalidRequest` domain error whose `details`
//! name the offending field and a stable `code`.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingParameters,
    InvalidNumber,
    InvalidDate,
    MalformedBody,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingParameters => "missing_parameters",
            Self::InvalidNumber => "invalid_number",
            Self::InvalidDate => "invalid_date",
            Self::MalformedBody => "malformed_body",
        }
    }
}

/// Name of a request field as clients spell it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_parameters_error(fields: &[FieldName]) -> Error {
    let names: Vec<&str> = fields.iter().map(|field| field.as_str()).collect();
    Error::invalid_request(format!("missing required parameters: {}", names.join(", ")))
        .with_details(json!({
            "fields": names,
            "code": ValidationCode::MissingParameters.as_str(),
        }))
}

fn invalid_value_error(field: FieldName, value: &str, message: String, code: ValidationCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

/// Collect the names of absent fields, failing when any is missing.
///
/// Reports all missing fields at once rather than the first one only.
pub(crate) fn require_present(fields: &[(FieldName, bool)]) -> Result<(), Error> {
    let missing: Vec<FieldName> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(field, _)| *field)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing_parameters_error(&missing))
    }
}

/// Parse a decimal integer query parameter.
pub(crate) fn parse_integer<T: std::str::FromStr>(value: &str, field: FieldName) -> Result<T, Error> {
    value.trim().parse().map_err(|_| {
        invalid_value_error(
            field,
            value,
            format!("{} must be an integer", field.as_str()),
            ValidationCode::InvalidNumber,
        )
    })
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
pub(crate) fn parse_expense_date(value: &str, field: FieldName) -> Result<DateTime<Utc>, Error> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc())
        .map_err(|_| {
            invalid_value_error(
                field,
                value,
                format!("{} must be an RFC 3339 timestamp or YYYY-MM-DD date", field.as_str()),
                ValidationCode::InvalidDate,
            )
        })
}

/// Calendar date of an RFC 3339 timestamp (in UTC) or a bare `YYYY-MM-DD`.
pub(crate) fn parse_calendar_date(value: &str, field: FieldName) -> Result<NaiveDate, Error> {
    parse_expense_date(value, field).map(|at| at.date_naive())
}

/// Error for request bodies or query strings the extractor could not decode.
pub(crate) fn malformed_request_error(detail: impl std::fmt::Display) -> Error {
    Error::invalid_request(format!("malformed request: {detail}")).with_details(json!({
        "code": ValidationCode::MalformedBody.as_str(),
    }))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    const YEAR: FieldName = FieldName::new("year");
    const DATE: FieldName = FieldName::new("date");

    fn code(error: &Error) -> Option<&str> {
        error
            .details()
            .and_then(|details| details.get("code"))
            .and_then(serde_json::Value::as_str)
    }

    #[rstest]
    fn lists_every_missing_field() {
        let err = require_present(&[
            (FieldName::new("id"), false),
            (YEAR, true),
            (FieldName::new("month"), false),
        ])
        .expect_err("two fields missing");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(code(&err), Some("missing_parameters"));
        assert_eq!(
            err.details().and_then(|d| d.get("fields")),
            Some(&json!(["id", "month"]))
        );
    }

    #[rstest]
    #[case("2025", Some(2025))]
    #[case(" 7 ", Some(7))]
    #[case("abc", None)]
    #[case("1.5", None)]
    fn parses_integers(#[case] raw: &str, #[case] expected: Option<i32>) {
        let parsed = parse_integer::<i32>(raw, YEAR);
        match expected {
            Some(value) => assert_eq!(parsed.expect("integer"), value),
            None => assert_eq!(code(&parsed.expect_err("not an integer")), Some("invalid_number")),
        }
    }

    #[rstest]
    #[case("2025-01-15T10:30:00Z", (2025, 1, 15, 10, 30))]
    #[case("2025-01-15T12:30:00+02:00", (2025, 1, 15, 10, 30))]
    #[case("2025-01-15", (2025, 1, 15, 0, 0))]
    fn parses_dates(#[case] raw: &str, #[case] expected: (i32, u32, u32, u32, u32)) {
        let (y, m, d, h, min) = expected;
        let want = Utc.with_ymd_and_hms(y, m, d, h, min, 0).single().expect("valid");
        assert_eq!(parse_expense_date(raw, DATE).expect("valid date"), want);
    }

    #[rstest]
    #[case("1990-05-15")]
    #[case("1990-05-15T23:30:00Z")]
    fn calendar_dates_drop_the_time(#[case] raw: &str) {
        assert_eq!(
            parse_calendar_date(raw, DATE).expect("valid date"),
            NaiveDate::from_ymd_opt(1990, 5, 15).expect("valid literal")
        );
    }

    #[rstest]
    fn rejects_unparseable_date() {
        let err = parse_expense_date("15/01/2025", DATE).expect_err("bad date");
        assert_eq!(code(&err), Some("invalid_date"));
    }
}
