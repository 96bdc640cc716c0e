//! User registration and lookup endpoints.
//!
//! ```text
//! POST /api/users {"id":7,"first_name":"John","last_name":"Doe","birthday":"1990-05-15"}
//! GET /api/users
//! GET /api/users/7
//! ```

use actix_web::{HttpResponse, get, post, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, User, UserDraft, UserId, UserSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_calendar_date, parse_integer, require_present,
};

const ID: FieldName = FieldName::new("id");
const FIRST_NAME: FieldName = FieldName::new("first_name");
const LAST_NAME: FieldName = FieldName::new("last_name");
const BIRTHDAY: FieldName = FieldName::new("birthday");

/// Request body for `POST /api/users`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = 7)]
    pub id: Option<i64>,
    #[schema(example = "John")]
    pub first_name: Option<String>,
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
    /// `YYYY-MM-DD`; must not be in the future.
    #[schema(example = "1990-05-15")]
    pub birthday: Option<String>,
}

/// Registered user as returned to the client.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// `YYYY-MM-DD`, absent when unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().get(),
            first_name: user.first_name().to_owned(),
            last_name: user.last_name().to_owned(),
            birthday: user.birthday().map(|date| date.format("%Y-%m-%d").to_string()),
        }
    }
}

/// User details with the sum of all their expenses.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserSummaryResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 42.5)]
    pub total: Decimal,
}

impl From<UserSummary> for UserSummaryResponse {
    fn from(summary: UserSummary) -> Self {
        let UserSummary { user, total } = summary;
        Self {
            id: user.id().get(),
            first_name: user.first_name().to_owned(),
            last_name: user.last_name().to_owned(),
            total,
        }
    }
}

fn parse_create_user_request(payload: CreateUserRequest) -> Result<UserDraft, Error> {
    require_present(&[
        (ID, payload.id.is_some()),
        (FIRST_NAME, payload.first_name.is_some()),
        (LAST_NAME, payload.last_name.is_some()),
        (BIRTHDAY, payload.birthday.is_some()),
    ])?;
    let (Some(id), Some(first_name), Some(last_name), Some(birthday)) = (
        payload.id,
        payload.first_name,
        payload.last_name,
        payload.birthday,
    ) else {
        return Err(Error::internal("user fields vanished after validation"));
    };
    Ok(UserDraft {
        id: UserId::new(id),
        first_name,
        last_name,
        birthday: Some(parse_calendar_date(&birthday, BIRTHDAY)?),
    })
}

/// Register a user under a client-chosen id.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "Registered user", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Id already registered", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_create_user_request(payload.into_inner())?;
    let user = state.users.create_user(draft).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// List registered users ordered by id.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 503, description = "Storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Fetch one user with their total spending.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User with expense total", body = UserSummaryResponse),
        (status = 400, description = "Id is not an integer", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserSummaryResponse>> {
    let user_id = UserId::new(parse_integer(&path.into_inner(), ID)?);
    let summary = state.users_query.user_summary(user_id).await?;
    Ok(web::Json(UserSummaryResponse::from(summary)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use chrono::NaiveDate;
    use mockall::predicate::eq;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::{
        FixtureExpenseCommand, FixtureReportQuery, MockUserCommand, MockUsersQuery,
    };
    use crate::inbound::http::state::HttpStateUserPorts;

    fn john() -> User {
        User::new(UserDraft {
            id: UserId::new(7),
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
            birthday: NaiveDate::from_ymd_opt(1990, 5, 15),
        })
        .expect("valid user")
    }

    async fn call(
        users: MockUserCommand,
        users_query: MockUsersQuery,
        req: test::TestRequest,
    ) -> (StatusCode, Value) {
        let state = HttpState::new_with_users(
            Arc::new(FixtureReportQuery),
            Arc::new(FixtureExpenseCommand),
            HttpStateUserPorts {
                users: Arc::new(users),
                users_query: Arc::new(users_query),
            },
        );
        let app = test::init_service(
            App::new().app_data(web::Data::new(state)).service(
                web::scope("/api")
                    .service(create_user)
                    .service(list_users)
                    .service(get_user),
            ),
        )
        .await;
        let res = test::call_service(&app, req.to_request()).await;
        let status = res.status();
        (status, test::read_body_json(res).await)
    }

    #[actix_web::test]
    async fn creates_user_and_echoes_it() {
        let mut users = MockUserCommand::new();
        users
            .expect_create_user()
            .withf(|draft| {
                draft.id == UserId::new(7)
                    && draft.birthday == NaiveDate::from_ymd_opt(1990, 5, 15)
            })
            .times(1)
            .returning(|draft| Ok(User::new(draft).expect("valid user")));

        let (status, body) = call(
            users,
            MockUsersQuery::new(),
            test::TestRequest::post().uri("/api/users").set_json(json!({
                "id": 7,
                "first_name": "John",
                "last_name": "Doe",
                "birthday": "1990-05-15"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "id": 7, "first_name": "John", "last_name": "Doe", "birthday": "1990-05-15" })
        );
    }

    #[rstest]
    #[case(json!({ "id": 7, "first_name": "Jane" }), "missing_parameters")]
    #[case(
        json!({ "id": 7, "first_name": "Jane", "last_name": "Doe", "birthday": "15/05/1990" }),
        "invalid_date"
    )]
    #[actix_web::test]
    async fn rejects_incomplete_registration(#[case] body: Value, #[case] code: &str) {
        let mut users = MockUserCommand::new();
        users.expect_create_user().never();

        let (status, response) = call(
            users,
            MockUsersQuery::new(),
            test::TestRequest::post().uri("/api/users").set_json(body),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["details"]["code"], code);
    }

    #[actix_web::test]
    async fn duplicate_registration_is_conflict() {
        let mut users = MockUserCommand::new();
        users
            .expect_create_user()
            .times(1)
            .return_once(|_| Err(Error::conflict("user 7 already exists")));

        let (status, body) = call(
            users,
            MockUsersQuery::new(),
            test::TestRequest::post().uri("/api/users").set_json(json!({
                "id": 7,
                "first_name": "John",
                "last_name": "Doe",
                "birthday": "1990-05-15"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "conflict");
    }

    #[actix_web::test]
    async fn lists_users() {
        let mut users_query = MockUsersQuery::new();
        users_query
            .expect_list_users()
            .times(1)
            .return_once(|| Ok(vec![john()]));

        let (status, body) = call(
            MockUserCommand::new(),
            users_query,
            test::TestRequest::get().uri("/api/users"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], 7);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
    }

    #[actix_web::test]
    async fn returns_user_with_total() {
        let mut users_query = MockUsersQuery::new();
        users_query
            .expect_user_summary()
            .with(eq(UserId::new(7)))
            .times(1)
            .return_once(|_| {
                Ok(UserSummary {
                    user: john(),
                    total: Decimal::new(4250, 2),
                })
            });

        let (status, body) = call(
            MockUserCommand::new(),
            users_query,
            test::TestRequest::get().uri("/api/users/7"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "id": 7, "first_name": "John", "last_name": "Doe", "total": 42.5 })
        );
    }

    #[actix_web::test]
    async fn non_numeric_id_is_rejected_before_lookup() {
        let mut users_query = MockUsersQuery::new();
        users_query.expect_user_summary().never();

        let (status, body) = call(
            MockUserCommand::new(),
            users_query,
            test::TestRequest::get().uri("/api/users/seven"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["code"], "invalid_number");
    }
}
