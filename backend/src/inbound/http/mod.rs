//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod expenses;
pub mod health;
pub mod reports;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

use validation::malformed_request_error;

/// JSON extractor settings: undecodable bodies become `invalid_request`
/// errors with the usual envelope instead of actix's plain-text 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| malformed_request_error(&err).into())
}

/// Query extractor settings mirroring [`json_config`].
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| malformed_request_error(&err).into())
}

/// Register the `/api` scope with its extractor settings.
///
/// Callers supply [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use expense_reports::inbound::http::{configure, state::HttpState};
///
/// let _app = App::new()
///     .app_data(web::Data::new(HttpState::default()))
///     .configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .app_data(query_config())
            .service(expenses::add_expense)
            .service(reports::get_report)
            .service(users::create_user)
            .service(users::list_users)
            .service(users::get_user),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::Value;

    use super::*;
    use crate::inbound::http::state::HttpState;

    #[actix_web::test]
    async fn malformed_json_uses_error_envelope() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::default()))
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/add")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"sum\": \"twelve\"")
            .to_request();

        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["code"], "malformed_body");
    }
}
