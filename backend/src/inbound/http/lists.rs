//! Shopping list and calendar handlers.
//!
//! ```text
//! POST /shopping/add     {"item":"milk"}
//! POST /shopping/reset
//! POST /calendar/add     {"title":"Dentist","date":"2026-10-18"}
//! POST /calendar/delete  {"id":1760774400000}
//! ```
//!
//! Every mutation answers with the full list as stored afterwards.

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use serde_json::Value;
use tracing::error;
use utoipa::ToSchema;

use super::state::HttpState;
use super::validation::{FieldName, invalid_id_error, missing_field_error, required_text};
use crate::domain::lists::{CalendarEvent, EventIdRef, ShoppingItem};
use crate::domain::ports::ListStoreError;
use crate::domain::{ApiResult, Error};

const ITEM: FieldName = FieldName::new("item");
const TITLE: FieldName = FieldName::new("title");
const DATE: FieldName = FieldName::new("date");
const ID: FieldName = FieldName::new("id");

fn map_store_error(err: ListStoreError) -> Error {
    error!(error = %err, "list store failed");
    match err {
        ListStoreError::Io { .. } => Error::service_unavailable("list storage unavailable"),
        ListStoreError::Encode { .. } => Error::internal("failed to store list"),
    }
}

/// Body for `POST /shopping/add`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AddItemRequest {
    #[schema(example = "milk")]
    pub item: Option<String>,
}

/// Body for `POST /calendar/add`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AddEventRequest {
    #[schema(example = "Dentist")]
    pub title: Option<String>,
    #[schema(example = "2026-10-18")]
    pub date: Option<String>,
}

/// Body for `POST /calendar/delete`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DeleteEventRequest {
    /// Event id as a number or string.
    #[schema(value_type = Object, example = 1_760_774_400_000_i64)]
    pub id: Option<Value>,
}

/// Append an item to the shopping list.
#[utoipa::path(
    post,
    path = "/shopping/add",
    request_body = AddItemRequest,
    responses(
        (status = 201, description = "Item added", body = [ShoppingItem]),
        (status = 400, description = "Missing item", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["lists"],
    operation_id = "addShoppingItem",
    security([])
)]
#[post("/shopping/add")]
pub async fn add_item(
    state: web::Data<HttpState>,
    payload: web::Json<AddItemRequest>,
) -> ApiResult<HttpResponse> {
    let item = required_text(payload.item.as_deref(), ITEM)?;
    let items = state.shopping.add(&item).await.map_err(map_store_error)?;
    Ok(HttpResponse::Created().json(items))
}

/// Empty the shopping list.
#[utoipa::path(
    post,
    path = "/shopping/reset",
    responses(
        (status = 200, description = "List emptied", body = [ShoppingItem]),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["lists"],
    operation_id = "resetShoppingList",
    security([])
)]
#[post("/shopping/reset")]
pub async fn reset_items(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<ShoppingItem>>> {
    let items = state.shopping.reset().await.map_err(map_store_error)?;
    Ok(web::Json(items))
}

/// Add a calendar entry.
#[utoipa::path(
    post,
    path = "/calendar/add",
    request_body = AddEventRequest,
    responses(
        (status = 201, description = "Event added", body = [CalendarEvent]),
        (status = 400, description = "Missing title or date", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["lists"],
    operation_id = "addCalendarEvent",
    security([])
)]
#[post("/calendar/add")]
pub async fn add_event(
    state: web::Data<HttpState>,
    payload: web::Json<AddEventRequest>,
) -> ApiResult<HttpResponse> {
    let title = required_text(payload.title.as_deref(), TITLE)?;
    let date = required_text(payload.date.as_deref(), DATE)?;
    let events = state
        .calendar
        .add(&title, &date)
        .await
        .map_err(map_store_error)?;
    Ok(HttpResponse::Created().json(events))
}

/// Delete calendar entries by id.
#[utoipa::path(
    post,
    path = "/calendar/delete",
    request_body = DeleteEventRequest,
    responses(
        (status = 200, description = "Remaining events", body = [CalendarEvent]),
        (status = 400, description = "Missing or unusable id", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["lists"],
    operation_id = "deleteCalendarEvent",
    security([])
)]
#[post("/calendar/delete")]
pub async fn delete_event(
    state: web::Data<HttpState>,
    payload: web::Json<DeleteEventRequest>,
) -> ApiResult<web::Json<Vec<CalendarEvent>>> {
    let id = match payload.id.as_ref() {
        None | Some(Value::Null) => return Err(missing_field_error(ID)),
        Some(raw) => EventIdRef::from_json(raw).ok_or_else(|| invalid_id_error(ID))?,
    };
    let events = state.calendar.delete(&id).await.map_err(map_store_error)?;
    Ok(web::Json(events))
}

#[cfg(test)]
mod tests {
    //! Handler coverage over mocked list stores.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use mockall::predicate::eq;
    use rstest::rstest;
    use serde_json::json;

    use crate::domain::ErrorCode;
    use crate::inbound::http::test_utils::TestPorts;
    use crate::inbound::http::validation::json_config;

    async fn post_json(ports: TestPorts, uri: &str, body: Value) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(ports.into_state())
                .app_data(json_config())
                .service(add_item)
                .service(reset_items)
                .service(add_event)
                .service(delete_event),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(uri)
                .set_json(body)
                .to_request(),
        )
        .await;
        let status = res.status();
        (status, test::read_body_json(res).await)
    }

    fn item(id: u64, name: &str) -> ShoppingItem {
        ShoppingItem {
            id,
            name: name.to_owned(),
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn adding_an_item_returns_the_list_as_created() {
        let mut ports = TestPorts::default();
        ports
            .shopping
            .expect_add()
            .with(eq("milk"))
            .times(1)
            .returning(|name| Ok(vec![item(1, "eggs"), item(2, name)]));

        let (status, body) = post_json(ports, "/shopping/add", json!({"item": " milk "})).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body,
            json!([{"id": 1, "name": "eggs"}, {"id": 2, "name": "milk"}])
        );
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({"item": ""}))]
    #[case(json!({"item": "   "}))]
    #[actix_web::test]
    async fn blank_items_are_rejected(#[case] payload: Value) {
        let mut ports = TestPorts::default();
        ports.shopping.expect_add().never();

        let (status, body) = post_json(ports, "/shopping/add", payload).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"], json!({"field": "item", "code": "missing_field"}));
    }

    #[rstest]
    #[actix_web::test]
    async fn reset_returns_an_empty_list() {
        let mut ports = TestPorts::default();
        ports.shopping.expect_reset().times(1).returning(|| Ok(Vec::new()));

        let (status, body) = post_json(ports, "/shopping/reset", json!({})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[rstest]
    #[actix_web::test]
    async fn adding_an_event_requires_title_and_date() {
        let mut ports = TestPorts::default();
        ports.calendar.expect_add().never();

        let (status, body) =
            post_json(ports, "/calendar/add", json!({"title": "Dentist"})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], "date");
    }

    #[rstest]
    #[actix_web::test]
    async fn adding_an_event_returns_the_calendar() {
        let mut ports = TestPorts::default();
        ports
            .calendar
            .expect_add()
            .with(eq("Dentist"), eq("2026-10-18"))
            .times(1)
            .returning(|title, date| {
                Ok(vec![CalendarEvent {
                    id: 1_760_774_400_000,
                    title: title.to_owned(),
                    date: date.to_owned(),
                }])
            });

        let (status, body) = post_json(
            ports,
            "/calendar/add",
            json!({"title": "Dentist", "date": "2026-10-18"}),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body,
            json!([{"id": 1_760_774_400_000_i64, "title": "Dentist", "date": "2026-10-18"}])
        );
    }

    #[rstest]
    #[case(json!(1_760_774_400_000_i64))]
    #[case(json!("1760774400000"))]
    #[actix_web::test]
    async fn delete_accepts_numeric_and_string_ids(#[case] id: Value) {
        let mut ports = TestPorts::default();
        ports
            .calendar
            .expect_delete()
            .withf(|id| id.as_str() == "1760774400000")
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let (status, body) = post_json(ports, "/calendar/delete", json!({ "id": id })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[rstest]
    #[case(json!({}), "missing_field")]
    #[case(json!({"id": null}), "missing_field")]
    #[case(json!({"id": ""}), "invalid_id")]
    #[case(json!({"id": 0}), "invalid_id")]
    #[case(json!({"id": [1]}), "invalid_id")]
    #[actix_web::test]
    async fn delete_rejects_unusable_ids(#[case] payload: Value, #[case] code: &str) {
        let mut ports = TestPorts::default();
        ports.calendar.expect_delete().never();

        let (status, body) = post_json(ports, "/calendar/delete", payload).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"], json!({"field": "id", "code": code}));
    }

    #[rstest]
    #[actix_web::test]
    async fn storage_failures_are_service_unavailable() {
        let mut ports = TestPorts::default();
        ports
            .shopping
            .expect_add()
            .returning(|_| Err(ListStoreError::io("disk full at /var/data")));

        let (status, body) = post_json(ports, "/shopping/add", json!({"item": "milk"})).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let err: Error = serde_json::from_value(body).expect("error envelope");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
        assert!(!err.message().contains("/var/data"));
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_bodies_use_the_error_envelope() {
        let mut ports = TestPorts::default();
        ports.shopping.expect_add().never();

        let (status, body) = post_json(ports, "/shopping/add", json!({"item": 5})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_request");
    }
}
