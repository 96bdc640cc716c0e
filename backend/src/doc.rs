//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the expense, report and user endpoints, the health checks
//! and the schema mirrors of domain types ([`ErrorSchema`],
//! [`ErrorCodeSchema`], [`ReportSchema`], [`CostItemSchema`]). The document
//! backs Swagger UI in debug builds and `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::expenses::{AddExpenseRequest, ExpenseResponse};
use crate::inbound::http::schemas::{CostItemSchema, ErrorCodeSchema, ErrorSchema, ReportSchema};
use crate::inbound::http::users::{CreateUserRequest, UserResponse, UserSummaryResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Expense reports API",
        description = "Record expenses and fetch category-grouped monthly reports."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::expenses::add_expense,
        crate::inbound::http::reports::get_report,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        AddExpenseRequest,
        ExpenseResponse,
        CreateUserRequest,
        UserResponse,
        UserSummaryResponse,
        ReportSchema,
        CostItemSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "expenses", description = "Recording expense entries"),
        (name = "reports", description = "Monthly expense reports"),
        (name = "users", description = "Registering and looking up users"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn assert_has_fields(name: &str, fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(obj)) => {
                for field in fields {
                    assert!(obj.properties.contains_key(*field), "{name} lacks {field}");
                }
            }
            _ => panic!("expected object schema for {name}"),
        }
    }

    #[test]
    fn error_schema_has_envelope_fields() {
        assert_has_fields("crate.domain.Error", &["code", "message", "traceId", "details"]);
    }

    #[test]
    fn report_schema_has_wire_fields() {
        assert_has_fields("crate.domain.ReportSnapshot", &["userId", "year", "month", "costs"]);
    }

    #[test]
    fn documents_every_endpoint() {
        let doc = ApiDoc::openapi();
        for path in ["/api/report", "/api/add", "/api/users", "/api/users/{id}"] {
            assert!(doc.paths.paths.contains_key(path), "{path} undocumented");
        }
    }

    #[test]
    fn user_summary_schema_has_total() {
        assert_has_fields("UserSummaryResponse", &["id", "first_name", "last_name", "total"]);
    }
}
