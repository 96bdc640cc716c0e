//! Expense entry endpoint.
//!
//! ```text
//! POST /api/add {"description":"lunch","category":"food","userid":7,"sum":12.5}
//! ```

use actix_web::{HttpResponse, post, web};
use chrono::SecondsFormat;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ports::NewExpenseRequest;
use crate::domain::{Error, ExpenseEntry, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_expense_date, require_present};

const DESCRIPTION: FieldName = FieldName::new("description");
const CATEGORY: FieldName = FieldName::new("category");
const USER_ID: FieldName = FieldName::new("userid");
const SUM: FieldName = FieldName::new("sum");
const DATE: FieldName = FieldName::new("date");

/// Request body for `POST /api/add`.
///
/// Every field is optional at the wire level so that absent values are
/// reported together as `missing_parameters`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AddExpenseRequest {
    #[schema(example = "lunch")]
    pub description: Option<String>,
    #[schema(example = "food")]
    pub category: Option<String>,
    #[schema(example = 7)]
    pub userid: Option<i64>,
    /// Non-negative amount.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>, example = 12.5)]
    pub sum: Option<Decimal>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`; defaults to now.
    #[schema(example = "2025-01-15")]
    pub date: Option<String>,
}

/// Stored expense as returned to the client.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ExpenseResponse {
    pub description: String,
    pub category: String,
    pub userid: i64,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub sum: Decimal,
    /// RFC 3339 timestamp in UTC.
    pub date: String,
}

impl From<ExpenseEntry> for ExpenseResponse {
    fn from(entry: ExpenseEntry) -> Self {
        Self {
            description: entry.description().to_owned(),
            category: entry.category().as_str().to_owned(),
            userid: entry.user_id().get(),
            sum: entry.amount(),
            date: entry
                .occurred_at()
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

fn parse_add_expense_request(payload: AddExpenseRequest) -> Result<NewExpenseRequest, Error> {
    require_present(&[
        (DESCRIPTION, payload.description.is_some()),
        (CATEGORY, payload.category.is_some()),
        (USER_ID, payload.userid.is_some()),
        (SUM, payload.sum.is_some()),
    ])?;
    let (Some(description), Some(category), Some(userid), Some(amount)) = (
        payload.description,
        payload.category,
        payload.userid,
        payload.sum,
    ) else {
        return Err(Error::internal("expense fields vanished after validation"));
    };
    let occurred_at = payload
        .date
        .as_deref()
        .map(|raw| parse_expense_date(raw, DATE))
        .transpose()?;
    Ok(NewExpenseRequest {
        user_id: UserId::new(userid),
        category,
        amount,
        description,
        occurred_at,
    })
}

/// Record one expense for a user.
///
/// Entries dated in an already closed month are rejected: their month's
/// report may be cached and must not change.
#[utoipa::path(
    post,
    path = "/api/add",
    request_body = AddExpenseRequest,
    responses(
        (status = 200, description = "Stored expense", body = ExpenseResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["expenses"],
    operation_id = "addExpense"
)]
#[post("/add")]
pub async fn add_expense(
    state: web::Data<HttpState>,
    payload: web::Json<AddExpenseRequest>,
) -> ApiResult<HttpResponse> {
    let request = parse_add_expense_request(payload.into_inner())?;
    let entry = state.expenses.add_expense(request).await?;
    Ok(HttpResponse::Ok().json(ExpenseResponse::from(entry)))
}
