//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`; these mirrors describe their wire
//! shape for the generated document.

use std::collections::BTreeMap;

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The user does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A user with the same id is already registered.
    #[schema(rename = "conflict")]
    Conflict,
    /// Storage is unavailable; retry later.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "Month must be between 1 and 12")]
    message: String,
    /// Correlation identifier, also returned in the `Trace-Id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field and code of a validation failure.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::CostItem`].
#[derive(ToSchema)]
#[schema(as = crate::domain::CostItem)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct CostItemSchema {
    #[schema(example = 12.5)]
    sum: f64,
    #[schema(example = "groceries")]
    description: String,
    /// Day of month (1-31).
    #[schema(example = 3)]
    day: u32,
}

/// OpenAPI schema for [`crate::domain::ReportSnapshot`].
///
/// `costs` lists one single-key object per category: the canonical
/// categories first, then any other category in order of first use.
#[derive(ToSchema)]
#[schema(as = crate::domain::ReportSnapshot)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ReportSchema {
    #[schema(example = 7)]
    user_id: i64,
    #[schema(example = 2025)]
    year: i32,
    #[schema(example = 1)]
    month: u32,
    costs: Vec<BTreeMap<String, Vec<CostItemSchema>>>,
}
