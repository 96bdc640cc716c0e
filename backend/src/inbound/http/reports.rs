//! Monthly report endpoint.
//!
//! ```text
//! GET /api/report?id=7&year=2025&month=1
//! ```

use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{Error, ReportError, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, ReportSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_integer, require_present};

const ID: FieldName = FieldName::new("id");
const YEAR: FieldName = FieldName::new("year");
const MONTH: FieldName = FieldName::new("month");

/// Raw query parameters; parsed by hand so every failure gets a field code.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportParams {
    /// Owning user id.
    #[param(example = "7")]
    pub id: Option<String>,
    #[param(example = "2025")]
    pub year: Option<String>,
    /// Month number, 1-12.
    #[param(example = "1")]
    pub month: Option<String>,
}

struct ReportRequest {
    user_id: UserId,
    year: i32,
    month: u32,
}

fn parse_report_params(params: ReportParams) -> Result<ReportRequest, Error> {
    require_present(&[
        (ID, params.id.is_some()),
        (YEAR, params.year.is_some()),
        (MONTH, params.month.is_some()),
    ])?;
    let (Some(id), Some(year), Some(month)) = (params.id, params.year, params.month) else {
        return Err(Error::internal("report parameters vanished after validation"));
    };
    Ok(ReportRequest {
        user_id: UserId::new(parse_integer(&id, ID)?),
        year: parse_integer(&year, YEAR)?,
        month: parse_month(&month)?,
    })
}

/// Any integer outside 1-12, negative ones included, is a month range error.
fn parse_month(raw: &str) -> Result<u32, Error> {
    let month: i64 = parse_integer(raw, MONTH)?;
    u32::try_from(month)
        .ok()
        .filter(|value| (1..=12).contains(value))
        .ok_or_else(|| ReportError::InvalidMonth { month }.into())
}

/// Fetch the report of one user for one month.
///
/// Reports for closed months are computed once and served from the cache
/// afterwards; the current and future months are always recomputed.
#[utoipa::path(
    get,
    path = "/api/report",
    params(ReportParams),
    responses(
        (status = 200, description = "Monthly report", body = ReportSchema),
        (status = 400, description = "Missing or invalid parameters", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "getReport"
)]
#[get("/report")]
pub async fn get_report(
    state: web::Data<HttpState>,
    params: web::Query<ReportParams>,
) -> ApiResult<HttpResponse> {
    let request = parse_report_params(params.into_inner())?;
    let report = state
        .reports
        .fetch_report(request.user_id, request.year, request.month)
        .await?;
    Ok(HttpResponse::Ok().json(report))
}
